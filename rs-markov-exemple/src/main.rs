use rs_markov_core::error::MarkovError;
use rs_markov_core::model::chain::{DEFAULT_LENGTH, MarkovChain};
use rs_markov_core::model::store::ModelStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Open the model store; if "./Model.json" exists from a previous run,
    // the chain starts already trained
    let store = ModelStore::open_default()?;
    let mut chain = MarkovChain::new(store);
    println!("Known prefixes at startup: {}", chain.count());

    // Generating before any training fails
    if !chain.is_trained() {
        match chain.generate(DEFAULT_LENGTH) {
            Ok(_) => println!("Should not happen"),
            Err(e) => println!("Expected failure: {e}"),
        }
    }

    // Train from raw text; sentences are separated by periods
    chain.train("Uno dos tres cuatro. Cinco Seis Siete Ocho.")?;
    println!("Known prefixes after training: {}", chain.count());

    // Training text without a period is rejected and the model keeps
    // its previous snapshot
    match chain.train("this text has no period") {
        Ok(_) => println!("Should not happen"),
        Err(e @ MarkovError::FormatText) => println!("Expected failure: {e}"),
        Err(e) => return Err(e.into()),
    }

    // A failed training pass leaves the chain untrained; train again
    chain.train("Nueve diez once doce. Trece catorce quince dieciseis.")?;
    println!("Known prefixes after retraining: {}", chain.count());

    // Generate a few sequences; the output may exceed the requested
    // length when the walk hits a dead end and re-seeds
    for i in 0..5 {
        println!("Generated sequence {}: {}", i + 1, chain.generate(DEFAULT_LENGTH)?);
    }

    Ok(())
}
