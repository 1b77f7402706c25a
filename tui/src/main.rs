use anyhow::Result;

mod app;
mod ui;

fn main() -> Result<()> {
    app::logging::init()?;
    app::run::run()
}
