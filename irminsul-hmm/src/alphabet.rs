//! Single-byte code alphabets for states and observations.
//!
//! An [`Alphabet`] maps uppercase ASCII codes to dense indices in the order
//! they were given. Input is uppercased before lookup, so `b"deW"` and
//! `b"DEW"` encode identically.

use irminsul_core::{IrminsulError, Result};

/// An ordered set of distinct uppercase ASCII codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    codes: Vec<u8>,
    /// `lookup[b]` = index of code `b`, for every byte.
    lookup: Vec<Option<usize>>,
}

impl Alphabet {
    /// Build an alphabet from `codes`, uppercasing each one.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::Validation`] if `codes` is empty, contains a
    /// non-graphic ASCII byte, or repeats a code (case-insensitively).
    pub fn new(codes: &[u8]) -> Result<Self> {
        if codes.is_empty() {
            return Err(IrminsulError::Validation("alphabet has no codes".into()));
        }
        let mut lookup = vec![None; 256];
        let mut upper = Vec::with_capacity(codes.len());
        for (i, &c) in codes.iter().enumerate() {
            if !c.is_ascii_graphic() {
                return Err(IrminsulError::Validation(format!(
                    "alphabet code {i} (0x{c:02x}) is not a printable ASCII character"
                )));
            }
            let u = c.to_ascii_uppercase();
            if let Some(prev) = lookup[u as usize] {
                return Err(IrminsulError::Validation(format!(
                    "alphabet code '{}' repeated at positions {prev} and {i}",
                    u as char
                )));
            }
            lookup[u as usize] = Some(i);
            upper.push(u);
        }
        Ok(Self {
            codes: upper,
            lookup,
        })
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the alphabet is empty (never true for a constructed alphabet).
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The codes in index order.
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Index of `code` (case-insensitive).
    pub fn index_of(&self, code: u8) -> Option<usize> {
        self.lookup[code.to_ascii_uppercase() as usize]
    }

    /// Code at `index`.
    pub fn code(&self, index: usize) -> Option<u8> {
        self.codes.get(index).copied()
    }

    /// Whether `code` belongs to the alphabet (case-insensitive).
    pub fn contains(&self, code: u8) -> bool {
        self.index_of(code).is_some()
    }

    /// The codes as labels, one single-character string per code.
    pub fn labels(&self) -> Vec<String> {
        self.codes.iter().map(|&c| (c as char).to_string()).collect()
    }

    /// Encode `text` into indices.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::InvalidObservation`] naming the first
    /// character that is not in the alphabet.
    pub fn encode(&self, text: &str) -> Result<Vec<usize>> {
        text.chars()
            .enumerate()
            .map(|(pos, ch)| {
                u8::try_from(ch)
                    .ok()
                    .and_then(|b| self.index_of(b))
                    .ok_or_else(|| {
                        IrminsulError::InvalidObservation(format!(
                            "character {ch:?} at position {pos} is not one of {:?}",
                            String::from_utf8_lossy(&self.codes)
                        ))
                    })
            })
            .collect()
    }

    /// Decode indices back into a code string.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::InvalidObservation`] for an index `>= len()`.
    pub fn decode(&self, indices: &[usize]) -> Result<String> {
        indices
            .iter()
            .enumerate()
            .map(|(pos, &i)| {
                self.code(i).map(char::from).ok_or_else(|| {
                    IrminsulError::InvalidObservation(format!(
                        "index {i} at position {pos} out of range (alphabet size {})",
                        self.len()
                    ))
                })
            })
            .collect()
    }

    /// Uppercase `text`, drop every character outside the alphabet, and keep
    /// at most `max_len` codes.
    pub fn sanitize(&self, text: &str, max_len: Option<usize>) -> String {
        let limit = max_len.unwrap_or(usize::MAX);
        text.chars()
            .filter_map(|ch| u8::try_from(ch).ok())
            .map(|b| b.to_ascii_uppercase())
            .filter(|&b| self.contains(b))
            .take(limit)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs() -> Alphabet {
        Alphabet::new(b"PHECADGW").unwrap()
    }

    #[test]
    fn indices_follow_code_order() {
        let a = obs();
        assert_eq!(a.len(), 8);
        assert_eq!(a.index_of(b'P'), Some(0));
        assert_eq!(a.index_of(b'W'), Some(7));
        assert_eq!(a.index_of(b'w'), Some(7));
        assert_eq!(a.index_of(b'X'), None);
        assert_eq!(a.code(6), Some(b'G'));
        assert_eq!(a.code(8), None);
        assert_eq!(a.labels()[2], "E");
    }

    #[test]
    fn new_uppercases_codes() {
        let a = Alphabet::new(b"acgt").unwrap();
        assert_eq!(a.codes(), b"ACGT");
        assert!(a.contains(b'c'));
    }

    #[test]
    fn new_rejects_bad_codes() {
        assert!(Alphabet::new(b"").unwrap_err().is_validation());
        assert!(Alphabet::new(b"AbB").unwrap_err().is_validation());
        assert!(Alphabet::new(b"A C").unwrap_err().is_validation());
    }

    #[test]
    fn encode_is_case_insensitive() {
        let a = obs();
        assert_eq!(a.encode("DEWEPWHWG").unwrap(), vec![5, 2, 7, 2, 0, 7, 1, 7, 6]);
        assert_eq!(a.encode("dewep").unwrap(), a.encode("DEWEP").unwrap());
        assert!(a.encode("").unwrap().is_empty());
    }

    #[test]
    fn encode_reports_unknown_character() {
        let err = obs().encode("PHX").unwrap_err();
        assert!(err.is_invalid_observation());
        assert!(err.to_string().contains("'X' at position 2"));
        assert!(obs().encode("PHé").is_err());
    }

    #[test]
    fn decode_round_trips_codes() {
        let a = obs();
        assert_eq!(a.decode(&[5, 2, 7]).unwrap(), "DEW");
        assert!(a.decode(&[8]).unwrap_err().is_invalid_observation());
    }

    #[test]
    fn sanitize_filters_and_truncates() {
        let a = obs();
        assert_eq!(a.sanitize("de-w e!p", None), "DEWEP");
        assert_eq!(a.sanitize("PPPPPPPPPPPPPPPPPPPP", Some(16)).len(), 16);
        assert_eq!(a.sanitize("xyz", Some(16)), "");
        assert_eq!(a.sanitize("pé h", Some(1)), "P");
    }
}
