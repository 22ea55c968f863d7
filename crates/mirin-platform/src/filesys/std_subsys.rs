use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::error::FsError;
use super::subsys::FileSubsystem;

/// Serves paths from the host filesystem.
///
/// Relative paths resolve against `root`; absolute paths are used as given.
/// Claims every path, so register it after the prefixed subsystems.
#[derive(Debug, Clone)]
pub struct StdFileSubsystem {
    root: PathBuf,
}

impl StdFileSubsystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn io_error(path: &str, source: io::Error) -> FsError {
        if source.kind() == io::ErrorKind::NotFound {
            FsError::NotFound {
                path: path.to_owned(),
            }
        } else {
            FsError::Io {
                path: path.to_owned(),
                source,
            }
        }
    }

    fn list(&self, path: &str, want_dirs: bool) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.resolve(path)) else {
            return Vec::new();
        };

        let mut out: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir() == want_dirs))
            .filter_map(|e| e.file_name().into_string().ok())
            .map(|name| {
                if path.is_empty() {
                    name
                } else {
                    format!("{}/{}", path.trim_end_matches('/'), name)
                }
            })
            .collect();
        out.sort();
        out
    }
}

impl FileSubsystem for StdFileSubsystem {
    fn is_file(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn read_file(&self, path: &str, out: &mut Vec<u8>) -> Result<(), FsError> {
        *out = fs::read(self.resolve(path)).map_err(|e| Self::io_error(path, e))?;
        Ok(())
    }

    fn read_file_into(&self, path: &str, buf: &mut [u8]) -> Result<usize, FsError> {
        let mut file = File::open(self.resolve(path)).map_err(|e| Self::io_error(path, e))?;

        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Self::io_error(path, e)),
            }
        }

        if filled == 0 {
            return Err(FsError::ShortRead {
                path: path.to_owned(),
            });
        }
        Ok(filled)
    }

    fn list_files(&self, path: &str) -> Vec<String> {
        self.list(path, false)
    }

    fn list_folders(&self, path: &str) -> Vec<String> {
        self.list(path, true)
    }
}
