use owo_colors::OwoColorize as _;

fn main() {
  match cotdash::run() {
    Ok(code) => std::process::exit(code),
    Err(err) => {
      anstream::eprintln!("{}", err.to_string().red());
      std::process::exit(cotdash::utils::error_messages::EXIT_FAILURE);
    }
  }
}
