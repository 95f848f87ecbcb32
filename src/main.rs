use std::process;

use csrkit::pipeline::Pipeline;
use tracing::info;

fn main() {
    tracing_subscriber::fmt().init();

    match Pipeline::from_env().run() {
        Ok(report) => {
            info!(
                key = %report.key_path.display(),
                csr = %report.csr_path.display(),
                "provisioning complete"
            );
        }
        Err(err) => {
            eprintln!("csrkit: {err}");
            process::exit(1);
        }
    }
}
