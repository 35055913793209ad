use super::MemoryFactSet;
use serde::Serialize;

const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Structured `memory` fact: system and swap sections with human-readable sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryFacts {
    pub system: MemorySection,
    pub swap: MemorySection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemorySection {
    pub total: String,
    pub total_bytes: u64,
    pub available: String,
    pub available_bytes: u64,
    pub used: String,
    pub used_bytes: u64,
    pub capacity: String,
}

impl MemorySection {
    fn new(total: u64, available: u64, used: u64, capacity: &str) -> Self {
        Self {
            total: bytes_to_human_readable(total),
            total_bytes: total,
            available: bytes_to_human_readable(available),
            available_bytes: available,
            used: bytes_to_human_readable(used),
            used_bytes: used,
            capacity: capacity.to_string(),
        }
    }
}

impl From<&MemoryFactSet> for MemoryFacts {
    fn from(set: &MemoryFactSet) -> Self {
        Self {
            system: MemorySection::new(set.total, set.memfree, set.used_bytes, &set.capacity),
            swap: MemorySection::new(
                set.swap_total,
                set.swap_free,
                set.swap_used_bytes,
                &set.swap_capacity,
            ),
        }
    }
}

/// Format a byte count as `"512 bytes"`, `"1.50 KiB"`, `"15.62 GiB"`, ...
pub fn bytes_to_human_readable(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    // Bump when two-decimal rounding would print 1024.00 in the current unit.
    while unit + 1 < UNITS.len() && (value * 100.0).round() / 100.0 >= 1024.0 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}
