fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Fog of War Chess - terminal");
    fog_of_war_chess::terminal::run_interactive_terminal();
}
