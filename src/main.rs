use tonegen::app::App;

fn main() -> anyhow::Result<()> {
    tonegen::logging::init();
    App::new().run()
}
