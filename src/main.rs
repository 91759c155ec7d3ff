//! Logsift - Host Log Review
//!
//! ホストのログを閲覧・検索し、既知の問題を診断する

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use logsift::adapter::config::Config;
use logsift::driver::{Args, LogReviewWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = LogReviewWorkflow::new(config);

    workflow.execute(args)
}
