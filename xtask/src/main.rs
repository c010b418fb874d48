use std::process::Command;

use anyhow::{bail, Context, Result};

const ARCHES: &[&str] = &["x86_64", "aarch64", "riscv64"];

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let task = args.next().unwrap_or_else(|| "help".to_string());
    match task.as_str() {
        "build" => build(args.collect()),
        "dist" => dist(args.collect()),
        "test" => test(args.collect()),
        _ => {
            print_help();
            Ok(())
        }
    }
}

fn target_triple(arch: &str) -> Result<&'static str> {
    Ok(match arch {
        "x86_64" => "x86_64-unknown-linux-gnu",
        "aarch64" => "aarch64-unknown-linux-gnu",
        "riscv64" => "riscv64gc-unknown-linux-gnu",
        other => bail!("unsupported architecture '{}', expected one of {:?}", other, ARCHES),
    })
}

fn build(args: Vec<String>) -> Result<()> {
    let arch = args.first().map(String::as_str).unwrap_or("x86_64");
    let release = args.iter().any(|a| a == "--release");
    cargo_build(arch, release)
}

fn dist(_args: Vec<String>) -> Result<()> {
    for arch in ARCHES {
        cargo_build(arch, true).with_context(|| format!("dist build for {}", arch))?;
    }
    Ok(())
}

fn cargo_build(arch: &str, release: bool) -> Result<()> {
    let target = target_triple(arch)?;
    let mut cmd = Command::new("cargo");
    cmd.arg("build")
        .arg("-p").arg("kexec")
        .arg("--bin").arg("kexec")
        .arg("--target").arg(target);
    if release {
        cmd.arg("--release");
    }
    run(&mut cmd, "kexec build")
}

fn test(args: Vec<String>) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test").arg("--workspace").arg("--exclude").arg("xtask").args(args);
    run(&mut cmd, "test")
}

fn run(cmd: &mut Command, name: &str) -> Result<()> {
    println!("[xtask] {}: {:?}", name, cmd);
    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn {}", name))?;
    if !status.success() {
        bail!("[xtask] {} failed with status {:?}", name, status);
    }
    Ok(())
}

fn print_help() {
    println!("xtask usage:\n  cargo run -p xtask -- build <x86_64|aarch64|riscv64> [--release]\n  cargo run -p xtask -- dist\n  cargo run -p xtask -- test [cargo test args]");
}
