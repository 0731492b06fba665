fn main() {
    for _ in 0..<<<count>>> {
        println!("Hello from <<<name>>>!");
    }
}
