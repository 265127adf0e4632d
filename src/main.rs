use water_rocket_simulation::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = match LaunchParameters::default().validate() {
        Ok(configuration) => configuration,
        Err(e) => {
            println!("Error in launch parameters: {}", e);
            return Err(e.into());
        }
    };

    let rocket = WaterRocket::new(configuration);
    println!(
        "Launching water rocket ({} samples, nose-over rule: {})",
        rocket.schedule.len(),
        rocket.nose_over().name()
    );

    match rocket.launch() {
        Ok(dataset) => {
            println!(
                "Rocket has landed after {} of {} samples.",
                dataset.len(),
                dataset.untrimmed_len()
            );
            println!("{}", dataset.summary());
        }
        Err(e) => {
            println!("Error during simulation: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
