//! Award catalog
//!
//! Fixed titles and descriptions for every achievement the board can hand
//! out. Category awards are looked up by (lowercased) challenge category.

pub struct Award {
    pub title: &'static str,
    pub description: &'static str,
}

pub const WEB: Award = Award {
    title: "🕸️ The Gentle Web Expert",
    description: "You navigate the web like an artist, smooth and elegant. (Most Web Solves) 🌸",
};

pub const REVERSING: Award = Award {
    title: "🔍 Enigmatic Engineer",
    description: "You reverse code with grace, unraveling mysteries with every step. (Most RE Solves) 🧚",
};

pub const PWN: Award = Award {
    title: "💥 The Empowered Pwner",
    description: "You take on challenges with strength and confidence. (Most PWN Solves) ✨",
};

pub const CRYPTO: Award = Award {
    title: "🔐 Elegant Cryptographer",
    description: "You decrypt secrets with poise, like a true international solver. (Most Crypto Solves) 💖",
};

pub const FORENSICS: Award = Award {
    title: "🕵️ Forensics Virtuoso",
    description: "Your investigative skills are second to none. (Most Forensics Solves) 🌷",
};

pub const MISC: Award = Award {
    title: "🤹 Jack of All Trades",
    description: "You gracefully handle any challenge thrown your way. (Most Miscellaneous Solves) 🎀",
};

pub const BLOCKCHAIN: Award = Award {
    title: "🔗 Blockchain Maven",
    description: "You're the go-to solver when it comes to distributed ledgers. (Most Blockchain Solves) 💎",
};

pub const FIRST_FIRST_BLOOD: Award = Award {
    title: "🥇 Graceful Trendsetter",
    description: "You're the first to shine, solving challenges with beauty and speed. (First Solve of All Challenges) 🌟",
};

pub const DOUBLE_BLOOD: Award = Award {
    title: "🩸 Fierce Competitor",
    description: "You keep winning first blood, showing your passion for success. (Most First Bloods) 💪",
};

pub const LONE_WOLF: Award = Award {
    title: "🐺 The Fiercely Independent",
    description: "You accomplish great things all on your own. (Most Individual Solves) 🌸",
};

pub const MASTER_OF_DISGUISE: Award = Award {
    title: "🎭 Master of Many Talents",
    description: "You seamlessly blend across categories, handling every challenge. (Solved Every Category) 🦋",
};

pub const COLLABORATIVE_GENIUS: Award = Award {
    title: "🧠 Collaborative Genius",
    description: "Your teamwork is unparalleled, solving challenges together. (Best Team Collaboration) 💕",
};

pub const FLAG_CONQUEROR: Award = Award {
    title: "🏆 Ultimate Flag Conqueror",
    description: "You claim the most flags, a champion in every way. (Most Total Solves) 🌺",
};

/// Category awards in display order.
pub const CATEGORY_AWARDS: &[&Award] = &[
    &WEB,
    &REVERSING,
    &PWN,
    &CRYPTO,
    &FORENSICS,
    &MISC,
    &BLOCKCHAIN,
];

/// Look up the award for a challenge category, if one exists.
///
/// "re" is an alias for "reverse engineering"; rows for both aliases fold
/// into the same award.
pub fn category_award(category: &str) -> Option<&'static Award> {
    match category.to_ascii_lowercase().as_str() {
        "web" => Some(&WEB),
        "reverse engineering" | "re" => Some(&REVERSING),
        "pwn" => Some(&PWN),
        "crypto" => Some(&CRYPTO),
        "forensics" => Some(&FORENSICS),
        "misc" => Some(&MISC),
        "blockchain" => Some(&BLOCKCHAIN),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(category_award("Web").unwrap().title, WEB.title);
        assert_eq!(category_award("PWN").unwrap().title, PWN.title);
    }

    #[test]
    fn reversing_aliases_share_an_award() {
        let long = category_award("reverse engineering").unwrap();
        let short = category_award("re").unwrap();
        assert_eq!(long.title, short.title);
    }

    #[test]
    fn unknown_category_has_no_award() {
        assert!(category_award("osint").is_none());
    }
}
