#[macro_use]
mod fs_util;
#[macro_use]
mod prelude;

mod archiver;
mod clargs;
mod crypt;
mod hasher;
mod manifest;
mod pad;
mod rand_util;
mod report;
mod secure_fs;
mod secure_vec;
mod xor;

#[cfg(test)]
mod tests_e2e;

use crate::{archiver::TarArchiver, clargs::*, crypt::*, prelude::*};
use ansi_term::Colour::Red;
use structopt::StructOpt;

fn main() {
    let opt = Opt::from_args();
    if let Err(err) = run(opt) {
        eprintln!("{} {}", Red.bold().paint("penpal: error:"), err);
        std::process::exit(err.exit_code());
    }
}

fn run(opt: Opt) -> PenpalResult<()> {
    match opt {
        Opt::Pad { cmd: PadCmd::Create { path, size_bytes } } => {
            let path = path.map(Ok).unwrap_or_else(secure_fs::default_pad_path)?;
            pad::create_pad(&path, size_bytes)?;
            let blocks = pad::block_count(&path)?;
            report::pad_created(&path, size_bytes, blocks);
            Ok(())
        }
        Opt::Encrypt { pad, source, dest, verbose } => {
            let pad = pad.map(Ok).unwrap_or_else(secure_fs::default_pad_path)?;
            let archiver = TarArchiver;
            let report = Encrypter::new(&archiver).encrypt(&pad, &source, &dest)?;
            if verbose {
                report::encrypted(&dest, &report);
            }
            Ok(())
        }
        Opt::Decrypt { pad, encrypted, out, verbose } => {
            let pad = pad.map(Ok).unwrap_or_else(secure_fs::default_pad_path)?;
            let archiver = TarArchiver;
            let dest_dir = out.clone().unwrap_or_else(|| {
                encrypted.parent().filter(|p| !p.as_os_str().is_empty()).map(Into::into).unwrap_or_else(|| ".".into())
            });
            let report = Decrypter::new(&archiver).decrypt(&pad, &encrypted, out.as_deref())?;
            if verbose {
                report::decrypted(&dest_dir, &report);
            }
            Ok(())
        }
    }
}
