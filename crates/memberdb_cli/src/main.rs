//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the member store end-to-end against a throwaway database.
//! - Keep output deterministic for quick local sanity checks.

use memberdb_core::{
    DirectConnectionSource, Member, MemberRepository, RepoError, SqliteMemberRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("memberdb_core version={}", memberdb_core::core_version());

    match smoke_cycle() {
        Ok(()) => {
            println!("smoke=ok");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("smoke=error {message}");
            ExitCode::FAILURE
        }
    }
}

fn smoke_cycle() -> Result<(), String> {
    let db_path = std::env::temp_dir().join(format!("memberdb-smoke-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&db_path);

    let source = DirectConnectionSource::open(&db_path).map_err(|err| err.to_string())?;
    let repo = SqliteMemberRepository::new(source);

    repo.save(&Member::new("smoke", 10_000))
        .map_err(|err| err.to_string())?;
    let loaded = repo.find_by_id("smoke").map_err(|err| err.to_string())?;
    println!("member_id={} money={}", loaded.member_id, loaded.money);

    repo.update("smoke", 20_000).map_err(|err| err.to_string())?;
    let updated = repo.find_by_id("smoke").map_err(|err| err.to_string())?;
    println!("money_after_update={}", updated.money);

    repo.delete("smoke").map_err(|err| err.to_string())?;
    let outcome = match repo.find_by_id("smoke") {
        Err(RepoError::NotFound(_)) => Ok(()),
        Ok(_) => Err("deleted member still present".to_string()),
        Err(err) => Err(err.to_string()),
    };

    let _ = std::fs::remove_file(&db_path);
    outcome
}
