mod app;

use crate::app::App;

fn main() -> anyhow::Result<()> {
    log4rs::init_file("log4rs.yaml", Default::default()).expect("Failed to initialize log4rs");
    let app = App::from_env()?;
    app.run()
}
