extern crate argparse;

use std::fs::{self, File};
use std::io::BufWriter;
use std::time::Duration;

use anagrams::{
    assemble, normalize, read_word_set, CancelFlag, CandidateOrder, Codec, CompiledDictionary,
    Dictionary, Error, PrimeWeights, Search, SearchConfig, SearchStatus, SortedLetters, Weights,
    WordListOptions,
};
use log::{info, warn};

const DEFAULT_WORD_LIST: &str = "/usr/share/dict/words";

struct Options {
    phrase: String,
    dictionary_path: String,
    compiled_path: Option<String>,
    save_path: Option<String>,
    exclude_path: Option<String>,
    minletters: usize,
    maxletters: Option<usize>,
    minwords: usize,
    maxwords: Option<usize>,
    time_limit: Option<f64>,
    order: String,
    seed: u64,
    no_dups: bool,
    primes: bool,
    parallel: bool,
    proper_nouns: bool,
    verbose: bool,
}

impl Options {
    fn parse() -> Self {
        use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};

        let mut options = Options {
            phrase: String::new(),
            dictionary_path: DEFAULT_WORD_LIST.to_owned(),
            compiled_path: None,
            save_path: None,
            exclude_path: None,
            minletters: 2,
            maxletters: None,
            minwords: 0,
            maxwords: None,
            time_limit: None,
            order: "longest".to_owned(),
            seed: 0,
            no_dups: false,
            primes: false,
            parallel: false,
            proper_nouns: false,
            verbose: false,
        };

        {
            let mut ap = ArgumentParser::new();
            ap.set_description("Find every multi-word anagram of the given phrase");
            ap.refer(&mut options.phrase)
                .required()
                .add_argument("phrase", Store, "Phrase to generate anagrams of (quote it if it has spaces)");
            ap.refer(&mut options.dictionary_path)
                .add_option(&["-f", "--dictionary"], Store, "The path of the word list");
            ap.refer(&mut options.compiled_path)
                .add_option(&["-c", "--compiled"], StoreOption, "Load a dictionary written by --save instead of a word list");
            ap.refer(&mut options.save_path)
                .add_option(&["--save"], StoreOption, "Write the loaded dictionary as JSON to this path");
            ap.refer(&mut options.exclude_path)
                .add_option(&["-x", "--exclude"], StoreOption, "File of words never to use");
            ap.refer(&mut options.minletters)
                .add_option(&["-l", "--min-letters"], Store, "The minimum number of letters per word");
            ap.refer(&mut options.maxletters)
                .add_option(&["-L", "--max-letters"], StoreOption, "The maximum number of letters per word");
            ap.refer(&mut options.minwords)
                .add_option(&["-w", "--min-words"], Store, "The minimum number of words in an anagram");
            ap.refer(&mut options.maxwords)
                .add_option(&["-W", "--max-words"], StoreOption, "The maximum number of words in an anagram");
            ap.refer(&mut options.time_limit)
                .add_option(&["-t", "--time-limit"], StoreOption, "Stop searching after this many seconds");
            ap.refer(&mut options.order)
                .add_option(&["--order"], Store, "Candidate order: longest, shortest or random");
            ap.refer(&mut options.seed)
                .add_option(&["--seed"], Store, "Seed for --order random");
            ap.refer(&mut options.no_dups)
                .add_option(&["--no-dups"], StoreTrue, "Disallow words that were in the original phrase");
            ap.refer(&mut options.primes)
                .add_option(&["--primes"], StoreTrue, "Encode letters as prime products");
            ap.refer(&mut options.parallel)
                .add_option(&["--parallel"], StoreTrue, "Explore first words on all cores");
            ap.refer(&mut options.proper_nouns)
                .add_option(&["--proper-nouns"], StoreTrue, "Keep capitalised words from the word list");
            ap.refer(&mut options.verbose)
                .add_option(&["-v", "--verbose"], StoreTrue, "Be chatty about what is taking place");
            ap.parse_args_or_exit();
        }

        options
    }

    fn word_list_options(&self) -> WordListOptions {
        WordListOptions {
            keep_proper_nouns: self.proper_nouns,
        }
    }

    fn search_config(&self) -> Result<SearchConfig, String> {
        let order = match self.order.parse::<CandidateOrder>()? {
            CandidateOrder::Random(_) => CandidateOrder::Random(self.seed),
            order => order,
        };
        let time_limit = match self.time_limit {
            Some(secs) if secs.is_finite() && secs >= 0.0 => Some(Duration::from_secs_f64(secs)),
            Some(secs) => return Err(format!("invalid time limit {}", secs)),
            None => None,
        };
        Ok(SearchConfig {
            min_len: self.minletters,
            max_len: self.maxletters,
            min_words: self.minwords,
            max_words: self.maxwords,
            time_limit,
            order,
        })
    }
}

fn print_set(set: &[String]) {
    println!("{}", set.join(" "));
}

fn solve<C: Codec>(codec: &C, mut dictionary: Dictionary<C::Key>, options: &Options, config: SearchConfig) -> Result<(), Error> {
    info!("{} keys representing {} words loaded.", dictionary.len(), dictionary.word_count());

    if let Some(path) = &options.save_path {
        dictionary.save_json(codec, BufWriter::new(File::create(path)?))?;
        info!("dictionary written to {}", path);
    }

    if options.no_dups {
        let words: Vec<&str> = options.phrase.split_whitespace().collect();
        let removed = dictionary.exclude(codec, &words);
        info!("{} words of the phrase excluded", removed);
    }
    if let Some(path) = &options.exclude_path {
        let words = read_word_set(path)?;
        let removed = dictionary.exclude(codec, &words);
        info!("{} words excluded by {}", removed, path);
    }

    let phrase = codec.encode(&options.phrase)?;

    let cancel = CancelFlag::new();
    let on_interrupt = cancel.clone();
    let handler = move || {
        if on_interrupt.cancel() {
            std::process::exit(130);
        }
        warn!("interrupted; finishing the current first word (interrupt again to quit)");
    };
    if let Err(e) = ctrlc::set_handler(handler) {
        warn!("interrupts will not stop the search early: {}", e);
    }

    let search = Search::new(&dictionary, phrase, config).with_cancel(cancel);
    let outcome = if options.parallel {
        search.run_parallel()
    } else {
        search.run()
    };

    let anagrams = assemble(outcome.tree.as_ref(), &dictionary, search.config().min_words);
    for set in &anagrams {
        print_set(set);
    }

    info!("{}", outcome.statistics);
    match outcome.status {
        SearchStatus::Complete => info!("{} anagrams found", anagrams.len()),
        SearchStatus::NoFeasibleWords => info!("no dictionary word can be spelt from {:?}", options.phrase),
        SearchStatus::TimedOut => warn!("time limit reached; the {} anagrams above are incomplete", anagrams.len()),
        SearchStatus::Cancelled => warn!("interrupted; the {} anagrams above are incomplete", anagrams.len()),
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let options = Options::parse();

    let default_filter = if options.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let phrase = normalize(&options.phrase);
    if phrase.is_empty() {
        return Err(Error::EmptyPhrase);
    }
    let config = match options.search_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    if let Some(path) = &options.compiled_path {
        let compiled = CompiledDictionary::from_path(path)?;
        return match compiled.weights()? {
            Some(weights) => {
                let codec = PrimeWeights(weights);
                let dictionary = compiled.to_dictionary(&codec);
                solve(&codec, dictionary, &options, config)
            }
            None => solve(&SortedLetters, compiled.to_dictionary(&SortedLetters), &options, config),
        };
    }

    if options.primes {
        let contents = fs::read_to_string(&options.dictionary_path).map_err(|source| Error::DictionaryUnavailable {
            path: options.dictionary_path.clone().into(),
            source,
        })?;
        // The phrase joins the corpus so every one of its letters has a weight.
        let weights = Weights::from_corpus(contents.split_whitespace().chain(Some(phrase.as_str())));
        let codec = PrimeWeights(weights);
        let dictionary = Dictionary::from_words(&codec, contents.split_whitespace(), options.word_list_options());
        return solve(&codec, dictionary, &options, config);
    }

    let dictionary = Dictionary::from_path(&SortedLetters, &options.dictionary_path, options.word_list_options())?;
    solve(&SortedLetters, dictionary, &options, config)
}
