use clap::Parser;
use transfer_index::app::{TransferApp, TransferAppError};

fn main() -> Result<(), TransferAppError> {
    env_logger::init();
    let args = TransferApp::parse();
    args.op.run()
}
