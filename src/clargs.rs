use std::path::PathBuf;
use structopt::StructOpt;

/// `penpal`'s command-line surface: pad lifecycle plus the two pipeline
/// operations. Mirrors the three-verb shape of the core contract directly;
/// there is no configuration subcommand because `penpal` has none beyond
/// the `PENPAL_*` environment overrides described alongside `SecureFs`.
#[derive(StructOpt, Debug)]
#[structopt(name = "penpal", about = "Encrypt and decrypt files with a disk-backed one-time pad")]
pub enum Opt {
    /// Operate on a pad directory.
    Pad {
        #[structopt(subcommand)]
        cmd: PadCmd,
    },
    /// Encrypt `source` against `pad`, writing the result to `dest`. `pad`
    /// defaults to the configured pad root (`$HOME/.pad`, or
    /// `PENPAL_PAD_ROOT`) when omitted.
    Encrypt {
        #[structopt(short, long)]
        pad: Option<PathBuf>,
        source: PathBuf,
        dest: PathBuf,
        /// Print a summary of blocks consumed and bytes processed.
        #[structopt(short, long)]
        verbose: bool,
    },
    /// Decrypt `encrypted` against `pad`, consuming the blocks it names.
    /// `pad` defaults to the configured pad root (`$HOME/.pad`, or
    /// `PENPAL_PAD_ROOT`) when omitted.
    Decrypt {
        #[structopt(short, long)]
        pad: Option<PathBuf>,
        encrypted: PathBuf,
        /// Directory to extract the recovered plaintext into. Defaults to
        /// the directory containing `encrypted`.
        #[structopt(short, long)]
        out: Option<PathBuf>,
        /// Print a summary of blocks consumed and bytes processed.
        #[structopt(short, long)]
        verbose: bool,
    },
}

#[derive(StructOpt, Debug)]
pub enum PadCmd {
    /// Create a new pad directory, pre-filled with random blocks totalling
    /// at least `size_bytes`. `path` defaults to the configured pad root
    /// (`$HOME/.pad`, or `PENPAL_PAD_ROOT`) when omitted.
    Create {
        #[structopt(short, long)]
        path: Option<PathBuf>,
        size_bytes: usize,
    },
}
