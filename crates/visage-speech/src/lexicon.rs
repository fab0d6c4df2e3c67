//! Lexicon - whole-word phoneme overrides
//!
//! A curated table of common short words (articles, prepositions,
//! pronouns, numbers) whose spelling is a poor guide to mouth shape.
//! Entries are matched against the full cleaned, uppercased word only.
//! Phoneme strings are whitespace-separated labels; some labels are
//! digraphs (`TH`, `CH`, `SH`) that have no pose of their own.

/// Word → phoneme string table
pub const LEXICON: &[(&str, &str)] = &[
    // Greetings, articles, pronouns
    ("HELLO", "H E L O"),
    ("HI", "H A I"),
    ("THE", "TH E"),
    ("AND", "A N D"),
    ("TO", "T U"),
    ("YOU", "Y U"),
    ("IS", "I S"),
    ("ARE", "A R"),

    // Question words
    ("WHAT", "W A T"),
    ("HOW", "H A U"),
    ("WHY", "W A I"),
    ("WHEN", "W E N"),
    ("WHERE", "W E R"),
    ("WHO", "H U"),
    ("WHICH", "W I CH"),
    ("THAT", "TH A T"),
    ("THIS", "TH I S"),
    ("THESE", "TH E S"),
    ("THOSE", "TH O S"),
    ("THERE", "TH E R"),
    ("THEIR", "TH E R"),
    ("THEY", "TH E"),
    ("THEM", "TH E M"),

    // Modals and auxiliaries
    ("CAN", "K A N"),
    ("COULD", "K U D"),
    ("WOULD", "W U D"),
    ("SHOULD", "SH U D"),
    ("WILL", "W I L"),
    ("SHALL", "SH A L"),
    ("MAY", "M E"),
    ("MIGHT", "M A I T"),
    ("MUST", "M A S T"),
    ("HAVE", "H A V"),
    ("HAS", "H A S"),
    ("HAD", "H A D"),
    ("DO", "D U"),
    ("DOES", "D A S"),
    ("DID", "D I D"),
    ("DONE", "D A N"),
    ("BE", "B E"),
    ("BEEN", "B I N"),
    ("BEING", "B E I N G"),
    ("WAS", "W A S"),
    ("WERE", "W E R"),
    ("AM", "A M"),

    // Prepositions
    ("FOR", "F O R"),
    ("FROM", "F R A M"),
    ("WITH", "W I TH"),
    ("WITHOUT", "W I TH A U T"),
    ("ABOUT", "A B A U T"),
    ("ABOVE", "A B A V"),
    ("BELOW", "B E L O"),
    ("UNDER", "A N D E R"),
    ("OVER", "O V E R"),
    ("BETWEEN", "B E T W E N"),
    ("AMONG", "A M A N G"),
    ("THROUGH", "TH R U"),
    ("THROUGHOUT", "TH R U A U T"),
    ("ACROSS", "A K R A S"),
    ("ALONG", "A L A N G"),
    ("AROUND", "A R A U N D"),
    ("AT", "A T"),
    ("BY", "B A I"),
    ("ON", "A N"),
    ("IN", "I N"),
    ("INTO", "I N T U"),
    ("ONTO", "A N T U"),
    ("OF", "A V"),
    ("OFF", "A F"),
    ("OUT", "A U T"),
    ("OUTSIDE", "A U T S A I D"),
    ("INSIDE", "I N S A I D"),
    ("UP", "A P"),
    ("DOWN", "D A U N"),
    ("BEFORE", "B E F O R"),
    ("AFTER", "A F T E R"),
    ("DURING", "D U R I N G"),

    // Conjunctions and adverbs
    ("SINCE", "S I N S"),
    ("UNTIL", "A N T I L"),
    ("TILL", "T I L"),
    ("WHILE", "W A I L"),
    ("BECAUSE", "B E K A S"),
    ("THOUGH", "TH O"),
    ("ALTHOUGH", "A L TH O"),
    ("IF", "I F"),
    ("UNLESS", "A N L E S"),
    ("LEST", "L E S T"),
    ("THAN", "TH A N"),
    ("AS", "A S"),
    ("SO", "S O"),
    ("SUCH", "S A CH"),
    ("RATHER", "R A TH E R"),
    ("QUITE", "K W A I T"),
    ("VERY", "V E R E"),
    ("TOO", "T U"),
    ("ALSO", "A L S O"),
    ("ELSE", "E L S"),
    ("AGAIN", "A G E N"),
    ("ONCE", "W A N S"),
    ("TWICE", "T W A I S"),
    ("THRICE", "TH R A I S"),

    // Order and time
    ("FIRST", "F E R S T"),
    ("SECOND", "S E K A N D"),
    ("THIRD", "TH E R D"),
    ("LAST", "L A S T"),
    ("NEXT", "N E K S T"),
    ("PREVIOUS", "P R E V E A S"),
    ("NOW", "N A U"),
    ("THEN", "TH E N"),
    ("SOON", "S U N"),
    ("LATER", "L E T E R"),
    ("EARLY", "E R L E"),
    ("LATE", "L E T"),
    ("TODAY", "T U D E"),
    ("TOMORROW", "T U M A R O"),
    ("YESTERDAY", "Y E S T E R D E"),

    // Places
    ("HERE", "H E R"),
    ("EVERYWHERE", "E V R E W E R"),
    ("NOWHERE", "N O W E R"),
    ("SOMEWHERE", "S A M W E R"),
    ("ANYWHERE", "E N E W E R"),

    // Answers and quantifiers
    ("YES", "Y E S"),
    ("NO", "N O"),
    ("NOT", "N A T"),
    ("ALL", "A L"),
    ("ANY", "E N E"),
    ("SOME", "S A M"),
    ("NONE", "N A N"),
    ("MANY", "M E N E"),
    ("MUCH", "M A CH"),
    ("MORE", "M O R"),
    ("MOST", "M O S T"),
    ("LESS", "L E S"),
    ("LEAST", "L E S T"),
    ("SEVERAL", "S E V E R A L"),
    ("FEW", "F U"),
    ("LITTLE", "L I T L"),
    ("EACH", "E CH"),
    ("EVERY", "E V R E"),
    ("EITHER", "E TH E R"),
    ("NEITHER", "N E TH E R"),
    ("BOTH", "B O TH"),

    // Numbers
    ("ONE", "W A N"),
    ("TWO", "T U"),
    ("THREE", "TH R E"),
    ("FOUR", "F O R"),
    ("FIVE", "F A I V"),
    ("SIX", "S I K S"),
    ("SEVEN", "S E V E N"),
    ("EIGHT", "E T"),
    ("NINE", "N A I N"),
    ("TEN", "T E N"),
];

/// Look up the phoneme string for a cleaned, uppercased word
pub fn lookup(word: &str) -> Option<&'static str> {
    LEXICON
        .iter()
        .find(|(entry, _)| *entry == word)
        .map(|(_, phonemes)| *phonemes)
}

/// Phoneme labels of a lexicon entry, in order
pub fn lookup_labels(word: &str) -> Option<impl Iterator<Item = &'static str>> {
    lookup(word).map(str::split_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit() {
        assert_eq!(lookup("HI"), Some("H A I"));
        assert_eq!(lookup("THROUGH"), Some("TH R U"));
    }

    #[test]
    fn test_lookup_is_exact_full_word() {
        assert_eq!(lookup("hi"), None);
        assert_eq!(lookup("HIS"), None);
        assert_eq!(lookup("H"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_entries_are_unique_and_clean() {
        for (i, (word, phonemes)) in LEXICON.iter().enumerate() {
            assert!(word.chars().all(|c| c.is_ascii_uppercase()), "{word}");
            assert!(!phonemes.trim().is_empty(), "{word}");
            assert!(
                LEXICON[i + 1..].iter().all(|(other, _)| other != word),
                "duplicate entry {word}"
            );
        }
    }

    #[test]
    fn test_lookup_labels() {
        let labels: Vec<_> = lookup_labels("WITHOUT").unwrap().collect();
        assert_eq!(labels, vec!["W", "I", "TH", "A", "U", "T"]);
        assert!(lookup_labels("XYZQ").is_none());
    }
}
