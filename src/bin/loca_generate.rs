use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    loca_synth::apps::run_generate(std::env::args().skip(1))
}
