fn main() {
    for _ in 0..3 {
        println!("Hello from widget!");
    }
}
