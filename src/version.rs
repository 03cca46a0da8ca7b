pub const APP_NAME: &str = "ricorda";
pub const BUILD: &str = env!("CARGO_PKG_VERSION");
