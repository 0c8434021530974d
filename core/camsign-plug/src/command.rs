//! Commands understood by the outlet.

/// A request to the outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugCommand {
    /// Switch the relay on (`true`) or off (`false`).
    SetRelayState(bool),
    /// Query system information.
    SystemInfo,
    /// Query system information together with realtime energy readings and
    /// meter calibration gains.
    MeterInfo,
    /// Query per-day energy statistics for a month.
    DailyStats { month: u32, year: i32 },
}

impl PlugCommand {
    /// The JSON body of the command, byte for byte as the outlet expects it.
    pub fn to_json(&self) -> String {
        match *self {
            Self::SetRelayState(on) => format!(
                r#"{{"system":{{"set_relay_state":{{"state":{}}}}}}}"#,
                u8::from(on)
            ),
            Self::SystemInfo => r#"{"system":{"get_sysinfo":{}}}"#.to_string(),
            Self::MeterInfo => {
                r#"{"system":{"get_sysinfo":{}},"emeter":{"get_realtime":{},"get_vgain_igain":{}}}"#
                    .to_string()
            }
            Self::DailyStats { month, year } => format!(
                r#"{{"emeter":{{"get_daystat":{{"month":{month},"year":{year}}}}}}}"#
            ),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetRelayState(true) => "turn_on",
            Self::SetRelayState(false) => "turn_off",
            Self::SystemInfo => "system_info",
            Self::MeterInfo => "meter_info",
            Self::DailyStats { .. } => "daily_stats",
        }
    }
}
