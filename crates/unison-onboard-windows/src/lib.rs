mod windows_host;

pub use windows_host::WindowsHost;

pub struct WindowsHostFactory;

impl WindowsHostFactory {
    pub fn create_host() -> WindowsHost {
        WindowsHost::new()
    }

    pub fn platform_name() -> &'static str {
        "Windows"
    }
}
