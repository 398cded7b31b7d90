pub use PenpalErr::*;

use std::{
    fmt::{self, Display, Formatter},
    io,
    path::PathBuf,
};

///
pub type PenpalResult<T> = Result<T, PenpalErr>;

/// Enum used to classify every error that `penpal` can raise.
///
/// Each variant maps to a unique exit code via `exit_code`, grouped by the
/// broad category described in the CLI's exit-code contract: usage errors,
/// missing dependencies, cryptographic preconditions, malformed ciphertext,
/// and generic I/O failure.
#[derive(Debug)]
pub enum PenpalErr {
    AlreadyExists(PathBuf),           // create_pad: something already exists at the target path
    BlockNotFound(String),            // manifest/decrypt references a block absent from the pad
    BlockTooLarge { requested: usize, max: usize }, // create_block: size exceeds MAX_BLOCK_SIZE
    EmptyOneTimePad(PathBuf),         // pad has no blocks when one was required
    InsecurePermissions(PathBuf),     // dir exists but its mode isn't exactly 0700
    Io(io::Error),                    // underlying filesystem failure
    MalformedCiphertext(String),      // outer archive missing/extra members
    ManifestTooShort(PathBuf),        // cipher stream had bytes left after the last manifest entry
    MissingDependency(String),        // external archiver unavailable
    NotADirectory(PathBuf),           // path exists but isn't a directory
    Other(String),                    // anything else
    PadBusy(PathBuf),                 // another session holds the pad lock
    PadConsumptionError(String),      // block was read but could not be unlinked
    ParentMissing(PathBuf),           // create_pad: parent of the target path doesn't exist
    PathMissing(PathBuf),             // path does not exist
    PathTraversal(PathBuf),           // archive member would escape its destination directory
}

impl PenpalErr {
    /// Assign a unique exit code to each variant, per the CLI's documented contract.
    ///
    /// DO NOT RELY ON THE EXACT NUMBERS, AS THEY MAY CHANGE IN THE FUTURE; the grouping
    /// (1 = usage, 2 = missing dependency, 3 = crypto precondition, 4 = malformed
    /// ciphertext, 5 = I/O) is the part callers should depend on.
    pub fn exit_code(&self) -> i32 {
        match self {
            MissingDependency(_) => 2,
            EmptyOneTimePad(_) | InsecurePermissions(_) | PadBusy(_) | PadConsumptionError(_) => 3,
            MalformedCiphertext(_) | ManifestTooShort(_) | BlockNotFound(_) | PathTraversal(_) => 4,
            Io(_) => 5,
            AlreadyExists(_) | BlockTooLarge { .. } | NotADirectory(_) | Other(_) | ParentMissing(_) | PathMissing(_) => 1,
        }
    }
}

impl Display for PenpalErr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        macro_rules! w {
            ( $( $arg:expr ),+ ) => {
                write!(f, $( $arg ),+)
            };
        }
        match self {
            AlreadyExists(pbuf) => w!("{:?} already exists", pbuf),
            BlockNotFound(name) => w!("Block `{}` is not present in the pad", name),
            BlockTooLarge { requested, max } => {
                w!("Cannot create blocks larger than {} bytes. Received request for {} bytes.", max, requested)
            }
            EmptyOneTimePad(pbuf) => w!("Pad at {:?} has no blocks left", pbuf),
            InsecurePermissions(pbuf) => w!("{:?} must have permissions set to 700", pbuf),
            Io(err) => w!("{}", err),
            MalformedCiphertext(desc) => w!("Malformed ciphertext: {}", desc),
            ManifestTooShort(pbuf) => w!("Manifest for {:?} is shorter than the ciphertext it describes", pbuf),
            MissingDependency(desc) => w!("Missing dependency: {}", desc),
            NotADirectory(pbuf) => w!("{:?} is not a directory", pbuf),
            Other(desc) => w!("{}", desc),
            PadBusy(pbuf) => w!("Pad at {:?} is in use by another session", pbuf),
            PadConsumptionError(name) => w!("Failed to destroy block `{}` after reading it", name),
            ParentMissing(pbuf) => w!("Parent directory of {:?} does not exist", pbuf),
            PathMissing(pbuf) => w!("{:?} does not exist", pbuf),
            PathTraversal(pbuf) => w!("Archive member {:?} would escape its destination directory", pbuf),
        }
    }
}

impl std::error::Error for PenpalErr {}

macro_rules! penpal_err {
    ( $variant:ident ) => {
        Err(PenpalErr::$variant)
    };
    ( $variant:ident, $( $field:expr ),* ) => {
        Err(PenpalErr::$variant($( $field ),*))
    };
    ( $variant:ident { $( $field:ident : $value:expr ),* $(,)? } ) => {
        Err(PenpalErr::$variant { $( $field : $value ),* })
    };
}

impl From<io::Error> for PenpalErr {
    #[inline]
    fn from(err: io::Error) -> Self {
        PenpalErr::Io(err)
    }
}

impl From<serde_yaml::Error> for PenpalErr {
    #[inline]
    fn from(err: serde_yaml::Error) -> Self {
        PenpalErr::Other(format!("{}", err))
    }
}

impl From<PenpalErr> for io::Error {
    #[inline]
    fn from(err: PenpalErr) -> io::Error {
        io::Error::new(io::ErrorKind::Other, format!("{}", err))
    }
}
