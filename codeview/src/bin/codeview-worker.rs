use anyhow::Result;
use codeview_core::Manager;
use pipe_display_server::{PipeDisplayServer, PipeWindowHandle};
use std::panic;

fn main() {
    let config = codeview::load();
    codeview::utils::log::setup_logging(&config.log_level);
    tracing::info!("codeview-worker booting...");
    let config = config.with_companion_lookup();

    let exit_status = panic::catch_unwind(|| -> Result<()> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        // The display server spawns its reader on construction.
        let _rt_guard = rt.enter();

        let manager = Manager::<PipeWindowHandle, codeview::Config, PipeDisplayServer>::new(config);
        manager.register_stop_hook();
        rt.block_on(manager.start_event_loop());
        Ok(())
    });

    match exit_status {
        Ok(Ok(())) => tracing::info!("Completed"),
        Ok(Err(err)) => tracing::error!("Completed with error: {}", err),
        Err(err) => tracing::error!("Completed with panic: {:?}", err),
    }
}
