use calcgen::generator::generate_test_data;
use calcgen::rng::RecordRng;

fn main() -> Result<(), calcgen::error::Error> {
    let known_seed = 12345u64;
    println!("# Test data generated from known seed: {}", known_seed);
    println!("# Format: index,a,b,operation,expected");

    let mut rng = RecordRng::new(known_seed);
    for record in generate_test_data(&mut rng, 16) {
        let record = record?;
        println!(
            "{},{},{},{},{}",
            record.index, record.a, record.b, record.operation, record.expected
        );
    }

    println!("# Replay with: calcgen generate --seed {} --num_records 16", known_seed);
    Ok(())
}
