use crate::foundation::error::{SimreelError, SimreelResult};

/// Half-open interval of step indices, `start < end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RenderRange {
    pub start: u64,
    pub end: u64, // exclusive
}

impl RenderRange {
    pub fn new(start: u64, end: u64) -> SimreelResult<Self> {
        if start >= end {
            return Err(SimreelError::validation(format!(
                "RenderRange start must be < end (got [{start}, {end}))"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn len_steps(self) -> u64 {
        self.end - self.start
    }

    pub fn contains(self, step: u64) -> bool {
        self.start <= step && step < self.end
    }
}

impl std::fmt::Display for RenderRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> SimreelResult<Self> {
        if den == 0 {
            return Err(SimreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SimreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// `num/den` form accepted by ffmpeg's `-framerate`.
    pub fn to_ffmpeg_arg(self) -> String {
        format!("{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
