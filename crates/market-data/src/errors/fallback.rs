/// Classification of a failed provider lookup.
///
/// Every class ends in mock data; the class only decides how the fallback is
/// reported.
///
/// # Behavior Summary
///
/// | Class | Log level | Meaning |
/// |-------|-----------|---------|
/// | `Expected` | info | No credential configured, mock data is the normal answer |
/// | `Throttled` | warn | Provider rate limit envelope |
/// | `Transient` | warn | Timeout, non-2xx, network failure |
/// | `BadPayload` | warn | Provider error envelope or unparseable body |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FallbackClass {
    /// Provider is deliberately unconfigured.
    Expected,

    /// Provider refused the call because of its request quota.
    Throttled,

    /// The call did not complete.
    Transient,

    /// The call completed but the payload was unusable.
    BadPayload,
}

impl FallbackClass {
    /// Log level the fallback should be reported at.
    pub fn log_level(self) -> log::Level {
        match self {
            FallbackClass::Expected => log::Level::Info,
            FallbackClass::Throttled | FallbackClass::Transient | FallbackClass::BadPayload => {
                log::Level::Warn
            }
        }
    }
}
