//! Build tooling for Strata modules.
//!
//! Usage: cargo xtask bundle <package> [--release] [--install]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Install destination when `STRATA_MODULE_DIR` is not set.
const DEFAULT_MODULE_DIR: &str = ".local/share/strata/modules";

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args[1] != "bundle" {
        print_usage();
        std::process::exit(1);
    }

    let package = &args[2];
    let release = args.iter().any(|a| a == "--release");
    let install = args.iter().any(|a| a == "--install");

    if let Err(e) = bundle(package, release, install) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: cargo xtask bundle <package> [--release] [--install]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  bundle    Build a module and place the loadable binary in target/");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --release    Build in release mode");
    eprintln!("  --install    Copy into the workstation's module directory");
    eprintln!("               ($STRATA_MODULE_DIR, default ~/{}/)", DEFAULT_MODULE_DIR);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  cargo xtask bundle quadvca --release");
    eprintln!("  cargo xtask bundle quadvca --release --install");
}

fn bundle(package: &str, release: bool, install: bool) -> Result<(), String> {
    println!("Bundling {} (release: {})...", package, release);

    let workspace_root = get_workspace_root()?;

    println!("Building...");
    let mut cmd = Command::new("cargo");
    cmd.arg("build")
        .arg("-p")
        .arg(package)
        .current_dir(&workspace_root);

    if release {
        cmd.arg("--release");
    }

    let status = cmd.status().map_err(|e| format!("Failed to run cargo: {}", e))?;
    if !status.success() {
        return Err("Build failed".to_string());
    }

    let profile = if release { "release" } else { "debug" };
    let target_dir = workspace_root.join("target").join(profile);

    // cargo names the artifact after the library target, underscored and
    // with a platform prefix/suffix; the workstation just wants <name>.so
    let lib_name = package.replace('-', "_");
    let cdylib_path = target_dir.join(cdylib_file_name(&lib_name));
    if !cdylib_path.exists() {
        return Err(format!("Built library not found: {}", cdylib_path.display()));
    }

    let module_name = format!("{}.so", package);
    let module_path = target_dir.join(&module_name);
    fs::copy(&cdylib_path, &module_path)
        .map_err(|e| format!("Failed to copy module binary: {}", e))?;
    println!("Module created: {}", module_path.display());

    if install {
        install_module(&module_path, &module_name)?;
    }

    Ok(())
}

fn cdylib_file_name(lib_name: &str) -> String {
    if cfg!(target_os = "macos") {
        format!("lib{}.dylib", lib_name)
    } else if cfg!(target_os = "windows") {
        format!("{}.dll", lib_name)
    } else {
        format!("lib{}.so", lib_name)
    }
}

fn get_workspace_root() -> Result<PathBuf, String> {
    let output = Command::new("cargo")
        .args(["locate-project", "--workspace", "--message-format=plain"])
        .output()
        .map_err(|e| format!("Failed to locate workspace: {}", e))?;

    if !output.status.success() {
        return Err("Failed to locate workspace".to_string());
    }

    let cargo_toml = String::from_utf8_lossy(&output.stdout);
    let path = PathBuf::from(cargo_toml.trim());
    path.parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| "Invalid workspace path".to_string())
}

fn install_module(module_path: &Path, module_name: &str) -> Result<(), String> {
    let module_dir = match std::env::var_os("STRATA_MODULE_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = std::env::var("HOME").map_err(|_| "HOME not set")?;
            PathBuf::from(home).join(DEFAULT_MODULE_DIR)
        }
    };

    fs::create_dir_all(&module_dir)
        .map_err(|e| format!("Failed to create module dir: {}", e))?;

    let dest = module_dir.join(module_name);
    fs::copy(module_path, &dest).map_err(|e| format!("Failed to install module: {}", e))?;

    println!("Module installed to: {}", dest.display());
    Ok(())
}
