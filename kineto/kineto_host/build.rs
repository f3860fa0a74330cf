use std::path::{Path, PathBuf};

// Built and linked, so a missing import library generator (`dlltool` on windows-gnu) disables raw-dylib here rather than failing the crate's own link
fn raw_dylib_probe(target_arch: &str) -> String {
    let import_name_type = if target_arch == "x86" {
        r#", import_name_type = "undecorated""#
    } else {
        ""
    };
    format!(
        r#"
#[link(name = "kernel32", kind = "raw-dylib"{})]
extern "system" {{
    fn GetCurrentThread() -> *mut core::ffi::c_void;
}}

fn main() {{
    let _ = unsafe {{ GetCurrentThread() }};
}}
"#,
        import_name_type
    )
}

fn links(rustc: &Path, flags: &[&str], target: Option<&str>, src: &Path, out: &Path) -> bool {
    let mut cmd = std::process::Command::new(rustc);
    cmd.args(flags)
        .args(["--crate-type", "bin"])
        .args(["--crate-name", "probe"])
        .args(["--emit", "link"])
        .arg("-o")
        .arg(out);
    if let Some(target) = target {
        cmd.args(["--target", target]);
    }
    if let Some(linker) = std::env::var_os("RUSTC_LINKER") {
        let mut arg = std::ffi::OsString::from("linker=");
        arg.push(linker);
        cmd.arg("-C").arg(arg);
    }
    cmd.arg(src)
        .stderr(std::process::Stdio::null())
        .status()
        .map_or(false, |status| status.success())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(has_raw_dylib)");

    // Only windows targets link against kernel32
    if std::env::var_os("CARGO_CFG_WINDOWS").is_none() {
        return;
    }

    let rustc = PathBuf::from(std::env::var_os("RUSTC").unwrap());
    let rustflags = std::env::var("CARGO_ENCODED_RUSTFLAGS")
        .ok()
        .unwrap_or_else(String::new);

    let flags = rustflags
        .split('\u{1f}')
        .filter(|flag| !flag.is_empty())
        .collect::<Vec<&str>>();

    let target = std::env::var("TARGET").ok();
    let target_arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let path = PathBuf::from(std::env::var_os("OUT_DIR").unwrap());

    let test_file_path = {
        let mut path = path.clone();

        path.push("probe.rs");
        path
    };

    let dummy_output_path = {
        let mut path = path;

        path.push("probe.exe");
        path
    };

    std::fs::write(&test_file_path, raw_dylib_probe(&target_arch)).unwrap();

    if links(
        &rustc,
        &flags,
        target.as_deref(),
        &test_file_path,
        &dummy_output_path,
    ) {
        println!("cargo:rustc-cfg=has_raw_dylib");
    } else {
        println!(
            "cargo:warning=raw-dylib unavailable; SetThreadDescription/GetThreadDescription must be present in the kernel32 import library"
        );
    }
}
