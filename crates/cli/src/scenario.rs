//! crates/cli/src/scenario.rs
//! The log calls made by the demo host application.
//!
//! The host registers a startup hook and one controller. Both receive the
//! shared logger and call it exactly as below; the replay keeps that order so
//! the console shows what the host would print under the same settings.

use logging::{Clock, SharedLogService};
use logging_sink::ConsoleSink;

/// Runs the startup hook and then the controller.
pub(crate) fn replay<S, C>(dbg: &SharedLogService<S, C>, yell: bool)
where
    S: ConsoleSink + Send + 'static,
    C: Clock + Send + 'static,
{
    #[cfg(feature = "tracing")]
    {
        use logging::DbgLayer;
        use tracing_subscriber::layer::SubscriberExt;

        let subscriber = tracing_subscriber::registry().with(DbgLayer::new(dbg.clone()));
        tracing::subscriber::with_default(subscriber, || {
            app_run(dbg);
            app_controller(dbg, yell);
            tracing::info!(target: "dbglog_demo", "#AppController > forwarded from tracing");
        });
    }

    #[cfg(not(feature = "tracing"))]
    {
        app_run(dbg);
        app_controller(dbg, yell);
    }
}

fn app_run<S, C>(dbg: &SharedLogService<S, C>)
where
    S: ConsoleSink,
    C: Clock,
{
    dbg.log(["#appRun started 0"]);
    dbg.log1(["#appRun started 1 "]);
    dbg.log2(["#appRun started 2"]);
}

fn app_controller<S, C>(dbg: &SharedLogService<S, C>, yell: bool)
where
    S: ConsoleSink,
    C: Clock,
{
    dbg.error(["#AppController > ERROR"]);
    dbg.warn(["#AppController > Warning"]);
    dbg.log(["#AppController > LOG"]);
    dbg.log1(["#AppController > DEBUG "]);
    dbg.log2(["#AppController > TRACE"]);
    if yell {
        dbg.yell(["#AppController > yell"]);
    }

    dbg.rs(["what?"]);
}
