use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use super::{run_ops, AnalysisArgs, SweepArgs, TransferAppConfig, TransferAppError};

/// Command line tool measuring, for each station of a rail line, how many distinct bus
/// routes can be boarded within a walking distance and a waiting window after a train
/// arrives.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TransferApp {
    #[command(subcommand)]
    pub op: TransferOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TransferOperation {
    /// compute the transfer index for one walking distance and wait threshold
    Run {
        #[command(flatten)]
        args: AnalysisArgs,
    },
    /// compute the transfer index over a list of walking distances and/or wait thresholds
    Sweep {
        #[command(flatten)]
        args: AnalysisArgs,
        #[command(flatten)]
        sweep: SweepArgs,
    },
}

impl TransferOperation {
    pub fn run(&self) -> Result<(), TransferAppError> {
        match self {
            TransferOperation::Run { args } => {
                let conf = TransferAppConfig::build(args, None)?;
                let summary = run_ops::run_analysis(&conf)?;
                run_ops::log_summary(&summary);
                Ok(())
            }
            TransferOperation::Sweep { args, sweep } => {
                let conf = TransferAppConfig::build(args, Some(sweep))?;
                let summary = run_ops::run_sweep(&conf)?;
                log::info!(
                    "sweep of {} points written to {}",
                    summary.points.len(),
                    conf.output_directory.display()
                );
                Ok(())
            }
        }
    }
}
