use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    loca_synth::apps::run_profile(std::env::args().skip(1))
}
