//! Legacy compact cosigner extra-data.
//!
//! Layout: one flag byte, then each flagged field in order.
//!
//! | bits | meaning                          | payload            |
//! |------|----------------------------------|--------------------|
//! | 7    | exclusive filler present         | 20-byte address    |
//! | 6    | input override present           | 32-byte amount     |
//! | 5    | output overrides present         | N × 32-byte amount |
//! | 0–4  | output override count `N` (≤ 31) |                    |
//!
//! Only the filler and amount overrides are representable; decay positions
//! and the exclusivity premium are not carried.

use alloy_primitives::{Address, U256};
use sluice_core::constants::{
    ADDRESS_LEN, EXTRA_DATA_FILLER_FLAG, EXTRA_DATA_INPUT_FLAG, EXTRA_DATA_LENGTH_MASK,
    EXTRA_DATA_OUTPUTS_FLAG, MAX_EXTRA_DATA_OUTPUTS, WORD_LEN,
};
use sluice_core::error::ExtraDataError;
use sluice_core::types::CosignerData;

/// Encode the filler and amount overrides of `data`.
///
/// Zero values are treated as absent and are not written.
pub fn encode(data: &CosignerData) -> Result<Vec<u8>, ExtraDataError> {
    let filler = data.exclusive_filler();
    let input = data.input_override();
    let outputs = data.output_overrides();

    let mut flags = 0u8;
    if filler.is_some() {
        flags |= EXTRA_DATA_FILLER_FLAG;
    }
    if input.is_some() {
        flags |= EXTRA_DATA_INPUT_FLAG;
    }
    if let Some(outputs) = outputs {
        if outputs.len() > MAX_EXTRA_DATA_OUTPUTS {
            return Err(ExtraDataError::TooManyOutputs(outputs.len()));
        }
        flags |= EXTRA_DATA_OUTPUTS_FLAG | outputs.len() as u8;
    }

    let mut out = vec![flags];
    if let Some(filler) = filler {
        out.extend_from_slice(filler.as_slice());
    }
    if let Some(input) = input {
        out.extend_from_slice(&input.to_be_bytes::<32>());
    }
    for amount in outputs.unwrap_or_default() {
        out.extend_from_slice(&amount.to_be_bytes::<32>());
    }
    Ok(out)
}

/// Decode legacy extra-data. Every byte must be consumed.
pub fn decode(bytes: &[u8]) -> Result<CosignerData, ExtraDataError> {
    let (&flags, mut rest) = bytes.split_first().ok_or(ExtraDataError::Empty)?;
    let count = flags & EXTRA_DATA_LENGTH_MASK;
    let has_outputs = flags & EXTRA_DATA_OUTPUTS_FLAG != 0;
    if !has_outputs && count != 0 {
        return Err(ExtraDataError::LengthWithoutOutputs(count));
    }

    let mut data = CosignerData::default();
    if flags & EXTRA_DATA_FILLER_FLAG != 0 {
        let raw = take(&mut rest, ADDRESS_LEN)?;
        data.exclusive_filler = Some(Address::from_slice(raw));
    }
    if flags & EXTRA_DATA_INPUT_FLAG != 0 {
        let raw = take(&mut rest, WORD_LEN)?;
        data.input_override = Some(U256::from_be_slice(raw));
    }
    if has_outputs {
        let raw = take(&mut rest, count as usize * WORD_LEN)?;
        data.output_overrides = Some(raw.chunks_exact(WORD_LEN).map(U256::from_be_slice).collect());
    }

    if !rest.is_empty() {
        return Err(ExtraDataError::TrailingBytes(rest.len()));
    }
    Ok(data)
}

fn take<'a>(rest: &mut &'a [u8], need: usize) -> Result<&'a [u8], ExtraDataError> {
    if rest.len() < need {
        return Err(ExtraDataError::Truncated { need, have: rest.len() });
    }
    let (head, tail) = rest.split_at(need);
    *rest = tail;
    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn empty_overrides_encode_to_flag_byte() {
        assert_eq!(encode(&CosignerData::default()).unwrap(), vec![0u8]);
        assert_eq!(decode(&[0u8]).unwrap(), CosignerData::default());
    }

    #[test]
    fn full_layout() {
        let filler = Address::repeat_byte(0xab);
        let data = CosignerData {
            exclusive_filler: Some(filler),
            input_override: Some(u(7)),
            output_overrides: Some(vec![u(1), u(2)]),
            ..Default::default()
        };
        let bytes = encode(&data).unwrap();
        assert_eq!(bytes[0], 0x80 | 0x40 | 0x20 | 2);
        assert_eq!(bytes.len(), 1 + 20 + 32 + 64);
        assert_eq!(&bytes[1..21], filler.as_slice());
        assert_eq!(bytes[52], 7);
        assert_eq!(decode(&bytes).unwrap(), data);
    }

    #[test]
    fn outputs_only() {
        let bytes = encode(&CosignerData {
            output_overrides: Some(vec![u(9)]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(bytes[0], 0x21);
        assert_eq!(bytes.len(), 33);
    }

    #[test]
    fn decay_fields_are_not_carried() {
        let bytes = encode(&CosignerData {
            decay_start: Some(u(1)),
            decay_end: Some(u(2)),
            exclusivity_override_bps: Some(u(3)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(bytes, vec![0u8]);
    }

    #[test]
    fn too_many_outputs() {
        let data = CosignerData {
            output_overrides: Some(vec![u(1); 32]),
            ..Default::default()
        };
        assert_eq!(encode(&data), Err(ExtraDataError::TooManyOutputs(32)));
        let data = CosignerData {
            output_overrides: Some(vec![u(1); 31]),
            ..Default::default()
        };
        assert_eq!(encode(&data).unwrap()[0], 0x3f);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(decode(&[]), Err(ExtraDataError::Empty));
        assert_eq!(decode(&[0x03]), Err(ExtraDataError::LengthWithoutOutputs(3)));
        assert_eq!(
            decode(&[0x80, 1, 2, 3]),
            Err(ExtraDataError::Truncated { need: 20, have: 3 })
        );
        assert_eq!(
            decode(&[0x22, 0, 0]),
            Err(ExtraDataError::Truncated { need: 64, have: 2 })
        );
        assert_eq!(decode(&[0x00, 0xff]), Err(ExtraDataError::TrailingBytes(1)));
    }

    #[test]
    fn outputs_flag_with_zero_count() {
        let data = decode(&[0x20]).unwrap();
        assert_eq!(data.output_overrides, Some(vec![]));
        assert_eq!(data.output_overrides(), None);
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
            let _ = decode(&bytes);
        }

        #[test]
        fn nonzero_overrides_survive_encoding(
            filler in prop::option::of(1u8..=255),
            input in prop::option::of(1u64..),
            outputs in prop::option::of(prop::collection::vec(1u64.., 1..=31)),
        ) {
            let data = CosignerData {
                exclusive_filler: filler.map(Address::repeat_byte),
                input_override: input.map(U256::from),
                output_overrides: outputs.map(|v| v.into_iter().map(U256::from).collect()),
                ..Default::default()
            };
            prop_assert_eq!(decode(&encode(&data).unwrap()).unwrap(), data);
        }
    }
}
