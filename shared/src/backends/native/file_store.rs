use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use rollcall_serde::ERASED_BYTE;

use crate::storage::{
    error::StoreError,
    persistent_store::{check_range, read_image, PersistentStore},
};

/// Store backed by an image file. Writes go to an in-memory working copy;
/// `commit` writes and syncs a sibling temp file, then renames it over the
/// image, so the previous image stays whole until the new one is complete.
pub struct FileStore {
    path: PathBuf,
    image: Vec<u8>,
}

impl FileStore {
    /// Open (or create) an image of `capacity` bytes. A shorter file is padded
    /// with erased bytes; a longer one is truncated to `capacity`.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut image = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!("No store image at {}, starting erased", path.display());
                Vec::new()
            }
            Err(error) => return Err(error),
        };
        image.resize(capacity, ERASED_BYTE);
        Ok(Self { path, image })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    fn write_image(&self) -> io::Result<()> {
        let staging = self.staging_path();
        let written = File::create(&staging).and_then(|mut file| {
            file.write_all(&self.image)?;
            file.sync_all()
        });
        if let Err(error) = written {
            let _ = fs::remove_file(&staging);
            return Err(error);
        }
        fs::rename(&staging, &self.path)
    }
}

impl PersistentStore for FileStore {
    fn capacity(&self) -> usize {
        self.image.len()
    }

    fn read(&self, address: usize, buffer: &mut [u8]) {
        read_image(&self.image, address, buffer);
    }

    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<(), StoreError> {
        check_range(address, bytes.len(), self.image.len())?;
        self.image[address..address + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.write_image().map_err(|error| StoreError::CommitFailed {
            reason: format!("{}: {}", self.path.display(), error),
        })
    }
}
