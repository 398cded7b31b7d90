use secstr::SecVec;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

/// The most commonly used concrete form: key material and in-flight
/// plaintext/ciphertext buffers, all of which must be zeroized once their
/// cryptographic operation is done.
pub type SecureBytes = SecureVec<u8>;

///
/// # Comparison using `==`
///
/// `SecureVec` is a wrapper around `SecVec`, so comparing two instances of
/// `SecureVec` using `==` happens via `secstr`'s constant-time comparison.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SecureVec<T>(SecVec<T>)
where
    T: Copy + Eq + Hash;

impl<T> SecureVec<T>
where
    T: Copy + Eq + Hash,
{
    pub fn new(vec: Vec<T>) -> Self {
        Self(SecVec::new(vec))
    }

    pub fn unsecure(&self) -> &[T] {
        self.0.unsecure()
    }

    pub fn len(&self) -> usize {
        self.0.unsecure().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Hash for SecureVec<T>
where
    T: Copy + Eq + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unsecure().hash(state);
    }
}

impl<T> FromIterator<T> for SecureVec<T>
where
    T: Copy + Eq + Hash,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> From<&[T]> for SecureVec<T>
where
    T: Copy + Eq + Hash,
{
    fn from(vec: &[T]) -> SecureVec<T> {
        vec.to_vec().into()
    }
}

impl<T> From<Vec<T>> for SecureVec<T>
where
    T: Copy + Eq + Hash,
{
    fn from(vec: Vec<T>) -> SecureVec<T> {
        SecureVec::new(vec)
    }
}
