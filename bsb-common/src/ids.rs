//! Video identifier conversion
//!
//! Some host surfaces only expose a numeric AV id while the metadata service
//! keys segments on the BV identifier, so the AV number must be converted
//! locally using the published XOR/base-58 scheme.

const XOR_CODE: u64 = 23_442_827_791_579;
const MAX_AID: u64 = 1 << 51;
const BASE: u64 = 58;
const ALPHABET: &[u8; 58] = b"FcwAPNKTMug3GV5Lj7EJnHpWsx4tb8haYeviqBz6rkCy12mUSDQX9RdoZf";

/// Convert a numeric AV id to its BV identifier
///
/// Encodes `(MAX_AID | aid) ^ XOR_CODE` in base 58 over the fixed alphabet,
/// then applies the index 3/9 and 4/7 transpositions. Returns `None` for ids
/// outside the 51-bit id space; anything larger needs more base-58 digits
/// than the fixed 12-character template holds.
pub fn av_to_bv(aid: u64) -> Option<String> {
    if aid >= MAX_AID {
        return None;
    }

    let mut bytes = *b"BV1000000000";
    let mut index = bytes.len() - 1;
    let mut tmp = (MAX_AID | aid) ^ XOR_CODE;

    while tmp > 0 {
        bytes[index] = ALPHABET[(tmp % BASE) as usize];
        tmp /= BASE;
        index -= 1;
    }

    bytes.swap(3, 9);
    bytes.swap(4, 7);

    // The buffer only ever holds alphabet bytes, all ASCII
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pairs() {
        assert_eq!(av_to_bv(2).unwrap(), "BV1xx411c7mD");
        assert_eq!(av_to_bv(170001).unwrap(), "BV17x411w7KC");
        assert_eq!(av_to_bv(111_298_867_365_120).unwrap(), "BV1L9Uoa9EUx");
    }

    #[test]
    fn test_output_shape() {
        let bv = av_to_bv(1).unwrap();
        assert_eq!(bv.len(), 12);
        assert!(bv.starts_with("BV1"));
    }

    #[test]
    fn test_aid_outside_id_space_rejected() {
        // 2^51 and above would need more digits than the template holds and
        // would corrupt the "BV" prefix if encoded anyway
        assert!(av_to_bv(1 << 51).is_none());
        assert!(av_to_bv(u64::MAX).is_none());
        assert!(av_to_bv((1 << 51) - 1).is_some());
    }
}
