use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match clubsite::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            rolling_logger::error(&format!("clubsite failed: {err}"));
            eprintln!("clubsite failed: {err}");
            ExitCode::FAILURE
        }
    }
}
