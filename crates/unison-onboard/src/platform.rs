use unison_onboard_core::HostPlatform;

/// Platform-independent factory that selects the appropriate host
/// implementation at compile time
pub struct PlatformHostFactory;

impl PlatformHostFactory {
    pub fn create_host() -> Box<dyn HostPlatform> {
        #[cfg(unix)]
        return Box::new(unison_onboard_unix::UnixHostFactory::create_host());

        #[cfg(windows)]
        return Box::new(unison_onboard_windows::WindowsHostFactory::create_host());
    }

    pub fn platform_name() -> &'static str {
        #[cfg(unix)]
        return unison_onboard_unix::UnixHostFactory::platform_name();

        #[cfg(windows)]
        return unison_onboard_windows::WindowsHostFactory::platform_name();
    }
}
