use bitphoto::{Config, Pipeline, ScriptedCamera, SyntheticCamera};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    pretty_env_logger::init();

    let config = Config::from_env();
    let pipeline = Pipeline::new(config);

    let mut scripted = ScriptedCamera::new(config.capacity);
    scripted
        .push("111000111000", 2, 6)
        .push("0110100110010110", 4, 4)
        .push("1".repeat(300), 10, 30);
    let mut synthetic = SyntheticCamera::new(24, 48, 3, config.capacity);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = pipeline
        .run(&mut scripted, &mut out)
        .and_then(|first| Ok((first, pipeline.run(&mut synthetic, &mut out)?)));
    match result {
        Ok((scripted, synthetic)) => {
            log::info!(
                "{} photos compressed, {} rejected",
                scripted.cycles + synthetic.cycles,
                scripted.rejected + synthetic.rejected
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
