use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

/// The ordered sequence of block names applied to a ciphertext, in the order
/// they were XORed in. Serializes to a YAML sequence of hex strings; does
/// not record per-block lengths, since every block but the last is a full
/// `STD_BLOCK_SIZE` and the last block's effective length is implicit in the
/// total ciphertext length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest(Vec<String>);

impl Manifest {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, block_name: String) {
        self.0.push(block_name);
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> PenpalResult<()> {
        let mut file = File::create(path)?;
        let yaml = serde_yaml::to_string(&self.0)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> PenpalResult<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let names: Vec<String> = serde_yaml::from_str(&contents)?;
        Ok(Self(names))
    }
}

impl IntoIterator for Manifest {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_yaml_on_disk() {
        let dir = tmpdir!().unwrap();
        let path = dir.path().join("manifest");

        let mut manifest = Manifest::new();
        manifest.push("aaaa".to_string());
        manifest.push("bbbb".to_string());
        manifest.push("cccc".to_string());
        manifest.write_to(&path).unwrap();

        let read_back = Manifest::read_from(&path).unwrap();
        assert_eq!(read_back, manifest);
        assert_eq!(read_back.names(), &["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn empty_manifest_round_trips() {
        let dir = tmpdir!().unwrap();
        let path = dir.path().join("manifest");
        Manifest::new().write_to(&path).unwrap();
        assert!(Manifest::read_from(&path).unwrap().is_empty());
    }

    #[test]
    fn serialized_form_is_a_yaml_sequence_of_strings() {
        let mut manifest = Manifest::new();
        manifest.push("deadbeef".to_string());
        let yaml = serde_yaml::to_string(&manifest.0).unwrap();
        assert!(yaml.contains("deadbeef"));
        assert!(yaml.trim_start().starts_with('-'));
    }
}
