use proptest::prelude::*;

use seed24::keypair::keypair_from_seed;
use seed24::openssh::{build_private_key_blob_with_check, seed_from_blob};
use seed24::phrase::{
    indices_to_payload, payload_to_indices, payload_to_words, seed_phrase_to_seed,
    seed_to_payload, seed_to_seed_phrase, words_to_payload, WORD_COUNT,
};
use seed24::wordlist::{English, WordlistSource};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn seed_survives_phrase_round_trip(seed in prop::array::uniform32(any::<u8>())) {
        let phrase = seed_to_seed_phrase(&seed, &English);
        prop_assert_eq!(phrase.split(' ').count(), WORD_COUNT);
        prop_assert_eq!(seed_phrase_to_seed(&phrase, &English).unwrap(), seed);
    }

    #[test]
    fn payload_survives_word_round_trip(seed in prop::array::uniform32(any::<u8>())) {
        let payload = seed_to_payload(&seed);
        let words = payload_to_words(&payload, &English);
        prop_assert_eq!(words_to_payload(&words, &English).unwrap(), payload);
    }

    #[test]
    fn any_indices_survive_packing(indices in prop::array::uniform24(0u16..2048)) {
        let payload = indices_to_payload(&indices);
        prop_assert_eq!(payload_to_indices(&payload), indices);

        let words: Vec<&str> = indices.iter().map(|&i| English.word_at(i)).collect();
        prop_assert_eq!(words_to_payload(&words, &English).unwrap(), payload);
    }

    #[test]
    fn built_blob_returns_its_seed(
        seed in prop::array::uniform32(any::<u8>()),
        check in any::<u32>(),
    ) {
        let keypair = keypair_from_seed(&seed).unwrap();
        let blob = build_private_key_blob_with_check(
            keypair.public.as_bytes(),
            &keypair.to_bytes(),
            check,
        );
        prop_assert_eq!(seed_from_blob(&blob).unwrap(), seed);
    }
}
