/// Shared filesystem helpers.
pub mod fs {
    use std::fs;
    use std::io;

    use camino::Utf8Path;

    /// How a directory became usable.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum DirStatus {
        Created,
        Existing,
    }

    /// Ensure `path` is a directory with a single, non-recursive create.
    ///
    /// An existing directory (or symlink to one) is accepted. Any other entry
    /// occupying the name is reported as `NotADirectory`.
    pub fn ensure_dir(path: &Utf8Path) -> io::Result<DirStatus> {
        match fs::create_dir(path) {
            Ok(()) => Ok(DirStatus::Created),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                if path.is_dir() {
                    Ok(DirStatus::Existing)
                } else {
                    Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        "exists but is not a directory",
                    ))
                }
            }
            Err(err) => Err(err),
        }
    }

}
