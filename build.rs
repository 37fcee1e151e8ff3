//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time.
//!
//! It also generates `utc.rs` with the wall clock reference and the clock preferences
//! the watchface starts with.

use chrono::{Local, Offset};
use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // 12h or 24h clock, defaults to 24h
    let clock_24h = match env::var("WATCHFACE_CLOCK").as_deref() {
        Ok("12h") => false,
        Ok("24h") | Err(_) => true,
        Ok(other) => panic!("WATCHFACE_CLOCK must be `12h` or `24h`, got `{}`", other),
    };

    // create rs file with current UTC time and the local offset of the build host
    let now = Local::now();
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_EPOCH: i64 = {:?};\nconst UTC_OFFSET: i32 = {:?};\nconst CLOCK_24H: bool = {:?};\n",
            now.timestamp(),
            now.offset().fix().local_minus_utc(),
            clock_24h,
        ))
        .unwrap();

    // No `rerun-if` directives: the build script has to run on every build so the
    // clock reference stays fresh.
}
