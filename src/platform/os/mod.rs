#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;
