// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MAME short name translation.
//!
//! Arcade ROM sets are named after MAME's eight-character driver names
//! (`mslug2.zip`). [`real_name`] maps such a stem to the game's title with a
//! binary search over a table sorted by key.

/// `(short name, title)` pairs, sorted by short name in byte order.
static MAME_NAMES: &[(&str, &str)] = &[
    ("1942", "1942"),
    ("1943", "1943: The Battle of Midway"),
    ("1943kai", "1943 Kai: Midway Kaisen"),
    ("19xx", "19XX: The War Against Destiny"),
    ("2020bb", "2020 Super Baseball"),
    ("3countb", "3 Count Bout / Fire Suplex"),
    ("aerofgt", "Aero Fighters"),
    ("aof", "Art of Fighting / Ryuuko no Ken"),
    ("aof2", "Art of Fighting 2 / Ryuuko no Ken 2"),
    ("aof3", "Art of Fighting 3: The Path of the Warrior"),
    ("arkanoid", "Arkanoid"),
    ("asteroid", "Asteroids"),
    ("avsp", "Alien vs. Predator"),
    ("bangbead", "Bang Bead"),
    ("batsugun", "Batsugun"),
    ("bjourney", "Blue's Journey / Raguy"),
    ("blazstar", "Blazing Star"),
    ("bombjack", "Bomb Jack"),
    ("breakrev", "Breakers Revenge"),
    ("bstars", "Baseball Stars Professional"),
    ("bublbobl", "Bubble Bobble"),
    ("burningf", "Burning Fight"),
    ("centiped", "Centipede"),
    ("cyberlip", "Cyber-Lip"),
    ("ddonpach", "DoDonPachi"),
    ("ddragon", "Double Dragon"),
    ("ddragon2", "Double Dragon II: The Revenge"),
    ("ddsom", "Dungeons & Dragons: Shadow over Mystara"),
    ("defender", "Defender"),
    ("digdug", "Dig Dug"),
    ("dino", "Cadillacs and Dinosaurs"),
    ("dkong", "Donkey Kong"),
    ("dkongjr", "Donkey Kong Junior"),
    ("donpachi", "DonPachi"),
    ("doubledr", "Double Dragon (Neo-Geo)"),
    ("dstlk", "Darkstalkers: The Night Warriors"),
    ("fatfursp", "Fatal Fury Special / Garou Densetsu Special"),
    ("fatfury1", "Fatal Fury - King of Fighters / Garou Densetsu"),
    ("fatfury2", "Fatal Fury 2 / Garou Densetsu 2"),
    ("fatfury3", "Fatal Fury 3 - Road to the Final Victory"),
    ("ffight", "Final Fight"),
    ("frogger", "Frogger"),
    ("galaga", "Galaga"),
    ("galaxian", "Galaxian"),
    ("garou", "Garou - Mark of the Wolves"),
    ("gauntlet", "Gauntlet"),
    ("ghostlop", "Ghostlop"),
    ("ghouls", "Ghouls'n Ghosts"),
    ("gng", "Ghosts'n Goblins"),
    ("gpilots", "Ghost Pilots"),
    ("gunsmoke", "Gun.Smoke"),
    ("joyjoy", "Puzzled / Joy Joy Kid"),
    ("kof2000", "The King of Fighters 2000"),
    ("kof2001", "The King of Fighters 2001"),
    ("kof2002", "The King of Fighters 2002"),
    ("kof2003", "The King of Fighters 2003"),
    ("kof94", "The King of Fighters '94"),
    ("kof95", "The King of Fighters '95"),
    ("kof96", "The King of Fighters '96"),
    ("kof97", "The King of Fighters '97"),
    ("kof98", "The King of Fighters '98 - The Slugfest"),
    ("kof99", "The King of Fighters '99 - Millennium Battle"),
    ("kotm", "King of the Monsters"),
    ("kotm2", "King of the Monsters 2 - The Next Thing"),
    ("lastblad", "The Last Blade / Bakumatsu Roman - Gekka no Kenshi"),
    ("lastbld2", "The Last Blade 2 / Bakumatsu Roman - Dai Ni Maku Gekka no Kenshi"),
    ("lbowling", "League Bowling"),
    ("magdrop2", "Magical Drop II"),
    ("magdrop3", "Magical Drop III"),
    ("maglord", "Magician Lord"),
    ("mappy", "Mappy"),
    ("matrim", "Matrimelee / Shin Gouketsuji Ichizoku Toukon"),
    ("mk", "Mortal Kombat"),
    ("mk2", "Mortal Kombat II"),
    ("mslug", "Metal Slug - Super Vehicle-001"),
    ("mslug2", "Metal Slug 2 - Super Vehicle-001/II"),
    ("mslug3", "Metal Slug 3"),
    ("mslug4", "Metal Slug 4"),
    ("mslug5", "Metal Slug 5"),
    ("mslugx", "Metal Slug X - Super Vehicle-001"),
    ("mspacman", "Ms. Pac-Man"),
    ("mvsc", "Marvel Vs. Capcom: Clash of Super Heroes"),
    ("nam1975", "NAM-1975"),
    ("neobombe", "Neo Bomberman"),
    ("ninjamas", "Ninja Master's - haoh-ninpo-cho"),
    ("outrun", "Out Run"),
    ("pacman", "Pac-Man"),
    ("pbobblen", "Puzzle Bobble / Bust-A-Move (Neo-Geo)"),
    ("puckman", "Puck Man"),
    ("pulstar", "Pulstar"),
    ("qbert", "Q*bert"),
    ("rbff1", "Real Bout Fatal Fury / Real Bout Garou Densetsu"),
    ("rbff2", "Real Bout Fatal Fury 2 - The Newcomers"),
    ("rbffspec", "Real Bout Fatal Fury Special / Real Bout Garou Densetsu Special"),
    ("robocop", "Robocop"),
    ("rotd", "Rage of the Dragons"),
    ("rtype", "R-Type"),
    ("samsho", "Samurai Shodown / Samurai Spirits"),
    ("samsho2", "Samurai Shodown II / Shin Samurai Spirits - Haohmaru jigokuhen"),
    ("samsho3", "Samurai Shodown III / Samurai Spirits - Zankurou Musouken"),
    ("samsho4", "Samurai Shodown IV - Amakusa's Revenge"),
    ("samsho5", "Samurai Shodown V / Samurai Spirits Zero"),
    ("sengoku", "Sengoku / Sengoku Denshou"),
    ("sf2", "Street Fighter II: The World Warrior"),
    ("sf2ce", "Street Fighter II': Champion Edition"),
    ("sfa", "Street Fighter Alpha: Warriors' Dreams"),
    ("sfa2", "Street Fighter Alpha 2"),
    ("sfa3", "Street Fighter Alpha 3"),
    ("sfiii", "Street Fighter III: New Generation"),
    ("sfiii3", "Street Fighter III 3rd Strike: Fight for the Future"),
    ("shocktro", "Shock Troopers"),
    ("simpsons", "The Simpsons"),
    ("sonicwi2", "Aero Fighters 2 / Sonic Wings 2"),
    ("spinmast", "Spin Master / Miracle Adventure"),
    ("ssf2", "Super Street Fighter II: The New Challengers"),
    ("ssf2t", "Super Street Fighter II Turbo"),
    ("ssideki", "Super Sidekicks / Tokuten Ou"),
    ("strider", "Strider"),
    ("tgmj", "Tetris The Grand Master"),
    ("tmnt", "Teenage Mutant Ninja Turtles"),
    ("twinspri", "Twinkle Star Sprites"),
    ("viewpoin", "Viewpoint"),
    ("wakuwak7", "Waku Waku 7"),
    ("wh1", "World Heroes"),
    ("wh2", "World Heroes 2"),
    ("whp", "World Heroes Perfect"),
    ("xmen", "X-Men"),
    ("xmvsf", "X-Men Vs. Street Fighter"),
    ("zedblade", "Zed Blade / Operation Ragnarok"),
    ("zupapa", "Zupapa!"),
];

/// Returns the title for MAME short name `stem`, or `stem` itself when the
/// name is not in the table.
#[must_use]
pub fn real_name(stem: &str) -> &str {
    match MAME_NAMES.binary_search_by(|&(key, _)| key.cmp(stem)) {
        Ok(i) => MAME_NAMES[i].1,
        Err(_) => stem,
    }
}

/// Number of known titles.
#[must_use]
pub fn title_count() -> usize {
    MAME_NAMES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_sorted() {
        for pair in MAME_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} must sort before {:?}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn known_names_translate() {
        assert_eq!(real_name("mslug2"), "Metal Slug 2 - Super Vehicle-001/II");
        assert_eq!(real_name("1942"), "1942");
        assert_eq!(real_name("zupapa"), "Zupapa!");
        assert_eq!(real_name("kof98"), "The King of Fighters '98 - The Slugfest");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(real_name("notagame"), "notagame");
        assert_eq!(real_name(""), "");
        assert_eq!(real_name("MSLUG2"), "MSLUG2", "lookup is case-sensitive");
    }

    #[test]
    fn count_matches_table() {
        assert_eq!(title_count(), MAME_NAMES.len());
        assert!(title_count() > 100);
    }
}
