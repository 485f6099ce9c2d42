mod unix_host;

pub use unix_host::UnixHost;

pub struct UnixHostFactory;

impl UnixHostFactory {
    pub fn create_host() -> UnixHost {
        UnixHost::new()
    }

    pub fn platform_name() -> &'static str {
        "Unix"
    }
}
