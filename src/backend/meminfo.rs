use crate::error::MemoryError;
use crate::model::MemoryFactSet;

const MEM_TOTAL: &str = "MemTotal";
const MEM_FREE: &str = "MemFree";
const SWAP_TOTAL: &str = "SwapTotal";
const SWAP_FREE: &str = "SwapFree";

/// The four quantities the facts are derived from, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeminfoReading {
    pub total: u64,
    pub free: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

impl MeminfoReading {
    pub fn into_fact_set(self) -> MemoryFactSet {
        let used_bytes = compute_used(self.total, self.free);
        let swap_used_bytes = compute_used(self.swap_total, self.swap_free);

        MemoryFactSet {
            total: self.total,
            memfree: self.free,
            used_bytes,
            capacity: compute_capacity(used_bytes, self.total),
            swap_total: self.swap_total,
            swap_free: self.swap_free,
            swap_used_bytes,
            swap_capacity: compute_capacity(swap_used_bytes, self.swap_total),
        }
    }
}

/// Parse `/proc/meminfo` content. Every required label must appear exactly
/// once as `<Label>: <digits> kB`; other lines are ignored.
pub fn parse(content: &str) -> Result<MeminfoReading, MemoryError> {
    let mut total = None;
    let mut free = None;
    let mut swap_total = None;
    let mut swap_free = None;

    for line in content.lines() {
        let Some((label, rest)) = line.split_once(':') else {
            continue;
        };
        let (label, slot) = match label {
            MEM_TOTAL => (MEM_TOTAL, &mut total),
            MEM_FREE => (MEM_FREE, &mut free),
            SWAP_TOTAL => (SWAP_TOTAL, &mut swap_total),
            SWAP_FREE => (SWAP_FREE, &mut swap_free),
            _ => continue,
        };
        if slot.is_some() {
            return Err(MemoryError::parse(label, "label appears more than once"));
        }
        *slot = Some(parse_kb_value(label, rest)?);
    }

    Ok(MeminfoReading {
        total: require(MEM_TOTAL, total)?,
        free: require(MEM_FREE, free)?,
        swap_total: require(SWAP_TOTAL, swap_total)?,
        swap_free: require(SWAP_FREE, swap_free)?,
    })
}

fn require(label: &'static str, value: Option<u64>) -> Result<u64, MemoryError> {
    value.ok_or_else(|| MemoryError::parse(label, "label not found"))
}

/// Value part after the colon: whitespace, digits, optional whitespace, `kB`.
fn parse_kb_value(label: &'static str, rest: &str) -> Result<u64, MemoryError> {
    if !rest.starts_with(char::is_whitespace) {
        return Err(MemoryError::parse(label, "expected whitespace after ':'"));
    }
    let rest = rest.trim();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, unit) = rest.split_at(digits_end);

    if digits.is_empty() {
        return Err(MemoryError::parse(
            label,
            format!("expected non-negative integer, got '{}'", rest),
        ));
    }
    let unit = unit.trim_start();
    if unit != "kB" {
        return Err(MemoryError::parse(
            label,
            format!("expected unit 'kB', got '{}'", unit),
        ));
    }

    let kilobytes: u64 = digits
        .parse()
        .map_err(|e| MemoryError::parse(label, format!("invalid value '{}': {}", digits, e)))?;
    kilobytes_to_bytes(kilobytes)
        .ok_or_else(|| MemoryError::parse(label, format!("{} kB overflows a byte count", kilobytes)))
}

pub fn kilobytes_to_bytes(kilobytes: u64) -> Option<u64> {
    kilobytes.checked_mul(1024)
}

/// Free above total counts as no usage.
pub fn compute_used(total: u64, free: u64) -> u64 {
    total.saturating_sub(free)
}

pub fn compute_capacity(used: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", used as f64 / total as f64 * 100.0)
}
