//! Check-requirements command implementation.
//!
//! Verifies that the plugin can read everything a check run needs.

use std::path::Path;

use check_open_files::{ProcFs, UsageChecker, UsageSource};

use crate::config::{validate_effective_config, Config};
use crate::startup_checks::{check_user_privileges, validate_requirements};

/// Validates runtime requirements and configuration. Exits 1 on failure.
pub fn command_check_requirements(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 check_open_files - Runtime Requirements");
    println!("==========================================");

    let proc_root = config.proc_root();
    let mut all_ok = true;

    println!("\n👤 Checking privileges...");
    if check_user_privileges() {
        println!("   ✅ Running as root");
    } else {
        println!("   ⚠️  Not running as root - foreign processes will show 0 open descriptors");
    }

    println!("\n📁 Checking {}...", proc_root.display());
    match validate_requirements(&proc_root) {
        Ok(_) => println!("   ✅ Counters, process list and descriptor directories readable"),
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    if all_ok {
        print_dry_run(&proc_root, config)?;
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All requirements met - ready for production!");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review warnings");
        std::process::exit(1);
    }
}

/// Runs one check and shows what the plugin would print.
fn print_dry_run(proc_root: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let source = ProcFs::new(proc_root);
    let checker = UsageChecker::new(config.thresholds()?);

    println!("\n🧪 Dry run...");
    println!("   📁 Found {} process entries", source.pids().len());
    let report = checker.run(&source);
    println!("   {} (exit {})", report.status_line(), report.exit_code());
    Ok(())
}
