use std::io;
use std::process::Command;

/// Opens a media URL in the system browser.
pub fn open_url(url: &str) -> io::Result<()> {
    if cfg!(target_os = "windows") {
        Command::new("explorer").arg(url).spawn()?;
    } else if cfg!(target_os = "linux") {
        Command::new("xdg-open").arg(url).spawn()?;
    } else if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()?;
    } else {
        return Err(io::Error::new(io::ErrorKind::Other, "Unsupported OS"));
    }

    Ok(())
}
