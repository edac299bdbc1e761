use crate::db::indices::PinId;
use crate::error::{Result, WirelengthError};
use rayon::prelude::*;

/// Below this many incidences the pin scan stays on the calling thread.
const PAR_PIN_CHECK_THRESHOLD: usize = 1 << 16;

pub fn check_coords<T>(coords: &[T]) -> Result<usize> {
    if coords.len() % 2 != 0 {
        return Err(WirelengthError::shape(format!(
            "coords must have an even number of elements, got {}",
            coords.len()
        )));
    }
    Ok(coords.len() / 2)
}

pub fn check_offsets(netpin_start: &[i32], flat_len: usize) -> Result<()> {
    let Some((&first, _)) = netpin_start.split_first() else {
        return Err(WirelengthError::shape(
            "netpin_start must hold num_nets + 1 entries, got none",
        ));
    };
    if first != 0 {
        return Err(WirelengthError::shape(format!(
            "netpin_start[0] must be 0, got {}",
            first
        )));
    }

    let mut prev = 0usize;
    for (i, &raw) in netpin_start.iter().enumerate() {
        let offset = usize::try_from(raw)
            .ok()
            .filter(|&o| o <= flat_len)
            .ok_or_else(|| {
                WirelengthError::shape(format!(
                    "netpin_start[{}] = {} outside [0, {}]",
                    i, raw, flat_len
                ))
            })?;
        if offset < prev {
            return Err(WirelengthError::shape(format!(
                "netpin_start is not monotonic at {}: {} < {}",
                i, offset, prev
            )));
        }
        prev = offset;
    }

    if prev != flat_len {
        return Err(WirelengthError::shape(format!(
            "netpin_start must end at len(flat_netpin) = {}, got {}",
            flat_len, prev
        )));
    }
    Ok(())
}

pub fn check_mask(mask_len: usize, num_nets: usize) -> Result<()> {
    if mask_len != num_nets {
        return Err(WirelengthError::shape(format!(
            "net_mask has {} entries for {} nets",
            mask_len, num_nets
        )));
    }
    Ok(())
}

pub fn check_weights(weights_len: usize, num_nets: usize) -> Result<()> {
    if weights_len != 0 && weights_len != num_nets {
        return Err(WirelengthError::shape(format!(
            "net_weights has {} entries for {} nets",
            weights_len, num_nets
        )));
    }
    Ok(())
}

/// Export buffers hold a min (or max) x row followed by a y row.
pub fn check_export_buffers(min_len: usize, max_len: usize, num_nets: usize) -> Result<()> {
    let expected = 2 * num_nets;
    if min_len != expected || max_len != expected {
        return Err(WirelengthError::shape(format!(
            "bbox buffers must have {} entries each, got min={} max={}",
            expected, min_len, max_len
        )));
    }
    Ok(())
}

/// Rejects the first `flat_netpin` entry that does not name one of `num_pins` pins.
pub fn check_pin_indices(flat_netpin: &[i32], num_pins: usize) -> Result<()> {
    let out_of_range = |raw: &i32| PinId::from_raw(*raw, num_pins).is_none();

    let bad = if flat_netpin.len() >= PAR_PIN_CHECK_THRESHOLD {
        flat_netpin.par_iter().position_first(out_of_range)
    } else {
        flat_netpin.iter().position(out_of_range)
    };

    match bad {
        Some(position) => {
            log::error!(
                "Pin index {} at flat_netpin[{}] is outside [0, {})",
                flat_netpin[position],
                position,
                num_pins
            );
            Err(WirelengthError::PinIndex {
                position,
                pin: flat_netpin[position] as i64,
                num_pins,
            })
        }
        None => Ok(()),
    }
}
