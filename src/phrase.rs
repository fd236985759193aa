#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(unused_mut)]

//! phrase implements functions for moving between a seed and a seed phrase. The format is the
//! BIP-39 encoding of 256 bits of entropy: the 32 byte seed is followed by one checksum byte
//! (the first byte of its SHA-256 hash), and the resulting 264 bits are split into 24 words of
//! 11 bits each, most significant bit first.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::wordlist::WordlistSource;
use crate::{Error, Result, Seed};

/// SEED_BYTES is the number of bytes in a seed.
pub const SEED_BYTES: usize = 32;

/// PAYLOAD_BYTES is the number of bytes encoded by a seed phrase: the seed plus one checksum
/// byte.
pub const PAYLOAD_BYTES: usize = SEED_BYTES + 1;

/// WORD_COUNT is the number of words in a seed phrase.
pub const WORD_COUNT: usize = 24;

/// BITS_PER_WORD is the number of payload bits carried by each word.
pub const BITS_PER_WORD: usize = 11;

// Each word is read out of a 24 bit big-endian window starting at the byte that holds its first
// bit. 11 bits starting at any bit offset always fit in three bytes.
const WINDOW_BITS: usize = 24;
const WORD_MASK: u32 = (1 << BITS_PER_WORD) - 1;

/// Payload is the seed followed by its checksum byte.
pub type Payload = [u8; PAYLOAD_BYTES];

/// WordIndices is a seed phrase as positions in the wordlist.
pub type WordIndices = [u16; WORD_COUNT];

/// checksum_byte returns the first byte of the SHA-256 hash of the seed.
pub fn checksum_byte(seed: &Seed) -> u8 {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.finalize()[0]
}

/// seed_to_payload appends the checksum byte to the seed.
pub fn seed_to_payload(seed: &Seed) -> Payload {
    let mut payload = [0u8; PAYLOAD_BYTES];
    payload[..SEED_BYTES].copy_from_slice(seed);
    payload[SEED_BYTES] = checksum_byte(seed);
    payload
}

/// payload_to_seed splits a payload into its seed, failing with ChecksumMismatch if the
/// checksum byte does not belong to the seed.
pub fn payload_to_seed(payload: &Payload) -> Result<Seed> {
    let mut seed: Seed = [0u8; SEED_BYTES];
    seed.copy_from_slice(&payload[..SEED_BYTES]);
    if checksum_byte(&seed) != payload[SEED_BYTES] {
        seed.zeroize();
        return Err(Error::ChecksumMismatch);
    }
    Ok(seed)
}

/// payload_to_indices packs the 264 payload bits into 24 word indices.
pub fn payload_to_indices(payload: &Payload) -> WordIndices {
    // The final word's window runs one byte past the payload, so work on a copy with a zero
    // byte of slack on the end.
    let mut scratch = [0u8; PAYLOAD_BYTES + 1];
    scratch[..PAYLOAD_BYTES].copy_from_slice(payload);

    let mut indices = [0u16; WORD_COUNT];
    for (i, index) in indices.iter_mut().enumerate() {
        let bit_offset = i * BITS_PER_WORD;
        let byte_index = bit_offset / 8;
        let bit_shift = bit_offset % 8;

        let window = (scratch[byte_index] as u32) << 16
            | (scratch[byte_index + 1] as u32) << 8
            | scratch[byte_index + 2] as u32;
        *index = ((window >> (WINDOW_BITS - BITS_PER_WORD - bit_shift)) & WORD_MASK) as u16;
    }
    scratch.zeroize();
    indices
}

/// indices_to_payload is the inverse of payload_to_indices. Only the low 11 bits of each index
/// are used.
pub fn indices_to_payload(indices: &WordIndices) -> Payload {
    let mut scratch = [0u8; PAYLOAD_BYTES + 1];
    for (i, &index) in indices.iter().enumerate() {
        let bit_offset = i * BITS_PER_WORD;
        let byte_index = bit_offset / 8;
        let bit_shift = bit_offset % 8;

        let window = (index as u32 & WORD_MASK) << (WINDOW_BITS - BITS_PER_WORD - bit_shift);
        scratch[byte_index] |= (window >> 16) as u8;
        scratch[byte_index + 1] |= (window >> 8) as u8;
        scratch[byte_index + 2] |= window as u8;
    }

    let mut payload = [0u8; PAYLOAD_BYTES];
    payload.copy_from_slice(&scratch[..PAYLOAD_BYTES]);
    scratch.zeroize();
    payload
}

/// payload_to_words looks up the word for each of the 24 indices of the payload.
pub fn payload_to_words<'a, W: WordlistSource + ?Sized>(
    payload: &Payload,
    wordlist: &'a W,
) -> Vec<&'a str> {
    payload_to_indices(payload)
        .iter()
        .map(|&index| wordlist.word_at(index))
        .collect()
}

/// words_to_indices validates a sequence of words against the wordlist. The word count is
/// checked first, then every word is looked up in order; the first unknown word is reported.
pub fn words_to_indices<S: AsRef<str>, W: WordlistSource + ?Sized>(
    words: &[S],
    wordlist: &W,
) -> Result<WordIndices> {
    if words.len() != WORD_COUNT {
        return Err(Error::WrongWordCount(words.len()));
    }

    let mut indices = [0u16; WORD_COUNT];
    for (index, word) in indices.iter_mut().zip(words) {
        let word = word.as_ref();
        *index = wordlist
            .lookup_index(word)
            .ok_or_else(|| Error::UnknownWord(word.to_string()))?;
    }
    Ok(indices)
}

/// words_to_payload converts 24 words back into the payload they encode. The checksum is not
/// verified here.
pub fn words_to_payload<S: AsRef<str>, W: WordlistSource + ?Sized>(
    words: &[S],
    wordlist: &W,
) -> Result<Payload> {
    let indices = words_to_indices(words, wordlist)?;
    Ok(indices_to_payload(&indices))
}

/// seed_to_seed_phrase will convert a seed into a seed phrase of 24 space separated words.
pub fn seed_to_seed_phrase<W: WordlistSource + ?Sized>(seed: &Seed, wordlist: &W) -> String {
    let mut payload = seed_to_payload(seed);
    let phrase = payload_to_words(&payload, wordlist).join(" ");
    payload.zeroize();
    phrase
}

/// seed_phrase_to_seed converts a seed phrase back into its seed. Words may be separated by any
/// amount of whitespace. The checksum is verified before the seed is returned.
pub fn seed_phrase_to_seed<W: WordlistSource + ?Sized>(phrase: &str, wordlist: &W) -> Result<Seed> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let mut payload = words_to_payload(&words, wordlist)?;
    let seed = payload_to_seed(&payload);
    payload.zeroize();
    seed
}

/// valid_seed_phrase will return an error if the seed phrase is not valid.
pub fn valid_seed_phrase<W: WordlistSource + ?Sized>(phrase: &str, wordlist: &W) -> Result<()> {
    seed_phrase_to_seed(phrase, wordlist).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_seed;
    use crate::wordlist::English;

    const ZERO_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon art";

    // verify_conversion will convert a given seed into a phrase and then back into a seed,
    // confirming that the new seed has its original value.
    fn verify_conversion(seed: Seed) {
        let phrase = seed_to_seed_phrase(&seed, &English);
        valid_seed_phrase(&phrase, &English).unwrap();
        let seed_conf = match seed_phrase_to_seed(&phrase, &English) {
            Ok(s) => s,
            Err(e) => panic!("verify_conversion failed: {}\n\t{:?}", e, seed),
        };
        if seed != seed_conf {
            panic!(
                "seed conversion failed: \n\t{:?}\n\t{:?}\n\t{}",
                seed, seed_conf, phrase
            );
        }
    }

    #[test]
    // the checksum of the zero seed is 0x66, which lands in the low 8 bits of the last word.
    fn check_zero_seed() {
        let seed = [0u8; 32];
        assert_eq!(checksum_byte(&seed), 0x66);

        let payload = seed_to_payload(&seed);
        let indices = payload_to_indices(&payload);
        assert_eq!(indices[0], 0);
        assert_eq!(English.word_at(indices[0]), "abandon");
        assert_eq!(indices[WORD_COUNT - 1], 0x66);

        let phrase = seed_to_seed_phrase(&seed, &English);
        assert_eq!(phrase, ZERO_PHRASE);
        assert_eq!(seed_phrase_to_seed(&phrase, &English).unwrap(), seed);
    }

    #[test]
    // BIP-39 English test vectors for 256 bits of entropy.
    fn check_bip39_vectors() {
        let vectors: [(u8, &str); 3] = [
            (
                0xff,
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo \
                 zoo zoo zoo vote",
            ),
            (
                0x7f,
                "legal winner thank year wave sausage worth useful legal winner thank year wave \
                 sausage worth useful legal winner thank year wave sausage worth title",
            ),
            (
                0x80,
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd \
                 amount doctor acoustic avoid letter advice cage absurd amount doctor acoustic bless",
            ),
        ];
        for (byte, expected) in vectors {
            let seed = [byte; 32];
            assert_eq!(seed_to_seed_phrase(&seed, &English), expected);
            assert_eq!(seed_phrase_to_seed(expected, &English).unwrap(), seed);
        }
        assert_eq!(checksum_byte(&[0xff; 32]), 0xaf);
    }

    #[test]
    // perform a basic test to see that a seed can be converted into a seed phrase and back.
    fn check_seed_phrases() {
        let mut seed = [0u8; 32];
        verify_conversion(seed);
        seed[0] = 185;
        verify_conversion(seed);
        seed[1] = 46;
        verify_conversion(seed);
        seed[15] = 7;
        verify_conversion(seed);
        seed[30] = 1;
        verify_conversion(seed);
        seed[31] = 254;
        verify_conversion(seed);
        verify_conversion([0xff; 32]);

        // Try with 1000 random seeds.
        for _ in 0..1000 {
            verify_conversion(random_seed());
        }
    }

    #[test]
    // the packer must be a bijection between payloads and index tuples.
    fn check_payload_indices_bijection() {
        for _ in 0..200 {
            let payload = seed_to_payload(&random_seed());
            let indices = payload_to_indices(&payload);
            assert_eq!(indices_to_payload(&indices), payload);
        }

        // Every index value must come back out of every slot unchanged, which includes the
        // extremes 0 and 2047 and the alternating patterns 0x555 and 0x2aa.
        for slot in 0..WORD_COUNT {
            for value in [0u16, 1, 0x2aa, 0x555, 0x400, 2047] {
                let mut indices = [0u16; WORD_COUNT];
                indices[slot] = value;
                let payload = indices_to_payload(&indices);
                let decoded = payload_to_indices(&payload);
                assert_eq!(decoded, indices, "slot {} value {:#x}", slot, value);
            }

            let mut indices = [2047u16; WORD_COUNT];
            indices[slot] = 0;
            assert_eq!(payload_to_indices(&indices_to_payload(&indices)), indices);
        }
    }

    #[test]
    // a payload of all ones packs to all 2047, and alternating bits alternate words.
    fn check_bit_patterns() {
        assert_eq!(payload_to_indices(&[0xff; PAYLOAD_BYTES]), [2047u16; WORD_COUNT]);
        assert_eq!(payload_to_indices(&[0u8; PAYLOAD_BYTES]), [0u16; WORD_COUNT]);

        // 0xaa repeated is 1010...; each word starts at bit i*11, so words alternate between
        // 10101010101 and 01010101010.
        let indices = payload_to_indices(&[0xaa; PAYLOAD_BYTES]);
        for (i, index) in indices.iter().enumerate() {
            let expected = if i % 2 == 0 { 0x555 } else { 0x2aa };
            assert_eq!(*index, expected, "word {}", i);
        }
    }

    #[test]
    // flipping a bit of the seed portion of the payload must be caught by the checksum for
    // these known seeds.
    fn check_checksum_rejection() {
        let seeds: [Seed; 3] = [[0u8; 32], [0xff; 32], [0x7f; 32]];
        for seed in seeds {
            let payload = seed_to_payload(&seed);
            for bit in 0..(SEED_BYTES * 8) {
                let mut tampered = payload;
                tampered[bit / 8] ^= 0x80 >> (bit % 8);
                let mut tampered_seed: Seed = [0u8; 32];
                tampered_seed.copy_from_slice(&tampered[..SEED_BYTES]);
                if checksum_byte(&tampered_seed) == payload[SEED_BYTES] {
                    // One in 256 flips collides on the first hash byte.
                    continue;
                }

                let words = payload_to_words(&tampered, &English);
                match seed_phrase_to_seed(&words.join(" "), &English) {
                    Err(Error::ChecksumMismatch) => {}
                    other => panic!("bit {} of {:?}: expected mismatch, got {:?}", bit, seed, other),
                }
            }

            // Tampering with the checksum byte itself always fails.
            for bit in 0..8 {
                let mut tampered = payload;
                tampered[SEED_BYTES] ^= 1 << bit;
                assert!(matches!(
                    payload_to_seed(&tampered),
                    Err(Error::ChecksumMismatch)
                ));
            }
        }
    }

    #[test]
    // Verify that each of these bad phrases results in the right error.
    fn check_unhappy_phrases() {
        let good_phrase = seed_to_seed_phrase(&random_seed(), &English);
        let good_words: Vec<&str> = good_phrase.split(' ').collect();

        // Removing a word.
        let bad_phrase = good_words[..23].join(" ");
        match seed_phrase_to_seed(&bad_phrase, &English) {
            Err(Error::WrongWordCount(23)) => {}
            other => panic!("expected WrongWordCount(23), got {:?}", other),
        }

        // Adding an extra word.
        let mut phrase_words = good_words.clone();
        phrase_words.push("abandon");
        match seed_phrase_to_seed(&phrase_words.join(" "), &English) {
            Err(Error::WrongWordCount(25)) => {}
            other => panic!("expected WrongWordCount(25), got {:?}", other),
        }

        // Empty phrase.
        assert!(matches!(
            seed_phrase_to_seed("   ", &English),
            Err(Error::WrongWordCount(0))
        ));

        // An unknown word.
        let mut phrase_words = good_words.clone();
        phrase_words[5] = "zzz";
        match seed_phrase_to_seed(&phrase_words.join(" "), &English) {
            Err(Error::UnknownWord(w)) => assert_eq!(w, "zzz"),
            other => panic!("expected UnknownWord, got {:?}", other),
        }

        // Prefixes and capitalization are not accepted.
        let mut phrase_words = good_words.clone();
        phrase_words[0] = "aban";
        assert!(matches!(
            seed_phrase_to_seed(&phrase_words.join(" "), &English),
            Err(Error::UnknownWord(_))
        ));
        let upper = ZERO_PHRASE.to_uppercase();
        assert!(matches!(
            seed_phrase_to_seed(&upper, &English),
            Err(Error::UnknownWord(w)) if w == "ABANDON"
        ));
    }

    #[test]
    // the word count is checked before any word is looked up.
    fn check_count_before_lookup() {
        match seed_phrase_to_seed("zzz", &English) {
            Err(Error::WrongWordCount(1)) => {}
            other => panic!("expected WrongWordCount(1), got {:?}", other),
        }
        let unknown = vec!["zzz"; 23].join(" ");
        assert!(matches!(
            seed_phrase_to_seed(&unknown, &English),
            Err(Error::WrongWordCount(23))
        ));
    }

    #[test]
    // extra whitespace between words is fine.
    fn check_whitespace() {
        let spaced = format!("  {}\n", ZERO_PHRASE.replace(' ', " \t "));
        assert_eq!(seed_phrase_to_seed(&spaced, &English).unwrap(), [0u8; 32]);
    }
}
