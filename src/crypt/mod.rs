mod decrypter;
mod encrypter;

pub use decrypter::{Decrypter, DecryptReport};
pub use encrypter::{Encrypter, EncryptReport};
