use clap::ValueEnum;
use std::fmt;

/// Platform a build is produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuildTarget {
    #[value(name = "StandaloneOSXIntel")]
    StandaloneOsxIntel,
    #[value(name = "StandaloneOSXIntel64")]
    StandaloneOsxIntel64,
    #[value(name = "StandaloneOSXUniversal")]
    StandaloneOsxUniversal,
    #[value(name = "StandaloneLinux")]
    StandaloneLinux,
    #[value(name = "StandaloneLinux64")]
    StandaloneLinux64,
    #[value(name = "StandaloneLinuxUniversal")]
    StandaloneLinuxUniversal,
    #[value(name = "StandaloneWindows")]
    StandaloneWindows,
    #[value(name = "StandaloneWindows64")]
    StandaloneWindows64,
    #[value(name = "iOS")]
    Ios,
    #[value(name = "Android")]
    Android,
    #[value(name = "WebGL")]
    WebGl,
    #[value(name = "WSAPlayer")]
    WsaPlayer,
    #[value(name = "Tizen")]
    Tizen,
    #[value(name = "PSP2")]
    Psp2,
    #[value(name = "PS4")]
    Ps4,
    #[value(name = "XboxOne")]
    XboxOne,
    #[value(name = "N3DS")]
    N3ds,
    #[value(name = "WiiU")]
    WiiU,
    #[value(name = "tvOS")]
    TvOs,
    #[value(name = "Switch")]
    Switch,
}

/// Targets sharing one set of scripting define symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuildTargetGroup {
    #[value(name = "Standalone")]
    Standalone,
    #[value(name = "iOS")]
    Ios,
    #[value(name = "Android")]
    Android,
    #[value(name = "WebGL")]
    WebGl,
    #[value(name = "WSA")]
    Wsa,
    #[value(name = "Tizen")]
    Tizen,
    #[value(name = "PSP2")]
    Psp2,
    #[value(name = "PS4")]
    Ps4,
    #[value(name = "XboxOne")]
    XboxOne,
    #[value(name = "N3DS")]
    N3ds,
    #[value(name = "WiiU")]
    WiiU,
    #[value(name = "tvOS")]
    TvOs,
    #[value(name = "Switch")]
    Switch,
    #[value(name = "Unknown")]
    Unknown,
}

impl BuildTarget {
    /// Group whose define symbols apply to this target
    pub fn group(self) -> BuildTargetGroup {
        match self {
            BuildTarget::StandaloneOsxIntel
            | BuildTarget::StandaloneOsxIntel64
            | BuildTarget::StandaloneOsxUniversal
            | BuildTarget::StandaloneLinux
            | BuildTarget::StandaloneLinux64
            | BuildTarget::StandaloneLinuxUniversal
            | BuildTarget::StandaloneWindows
            | BuildTarget::StandaloneWindows64 => BuildTargetGroup::Standalone,
            BuildTarget::Ios => BuildTargetGroup::Ios,
            BuildTarget::Android => BuildTargetGroup::Android,
            BuildTarget::WebGl => BuildTargetGroup::WebGl,
            BuildTarget::WsaPlayer => BuildTargetGroup::Wsa,
            BuildTarget::Tizen => BuildTargetGroup::Tizen,
            BuildTarget::Psp2 => BuildTargetGroup::Psp2,
            BuildTarget::Ps4 => BuildTargetGroup::Ps4,
            BuildTarget::XboxOne => BuildTargetGroup::XboxOne,
            BuildTarget::N3ds => BuildTargetGroup::N3ds,
            BuildTarget::WiiU => BuildTargetGroup::WiiU,
            BuildTarget::TvOs => BuildTargetGroup::TvOs,
            BuildTarget::Switch => BuildTargetGroup::Switch,
        }
    }
}

impl Default for BuildTarget {
    fn default() -> Self {
        BuildTarget::StandaloneWindows64
    }
}

/// Display uses the same names the CLI accepts
fn value_name<T: ValueEnum>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.to_possible_value() {
        Some(v) => f.write_str(v.get_name()),
        None => Ok(()),
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        value_name(self, f)
    }
}

impl fmt::Display for BuildTargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        value_name(self, f)
    }
}
