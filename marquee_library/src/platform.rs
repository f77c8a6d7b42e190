// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform identifiers.

use core::fmt;

/// A hardware platform a system emulates.
///
/// Used to pick scraper sources and to decide whether MAME name translation
/// applies (see [`SystemInfo::is_arcade`](crate::SystemInfo::is_arcade)).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "variants are named after the platform")]
pub enum PlatformId {
    ThreeDo,
    Amiga,
    AmstradCpc,
    AppleII,
    Arcade,
    Atari800,
    Atari2600,
    Atari5200,
    Atari7800,
    AtariJaguar,
    AtariLynx,
    AtariSt,
    ColecoVision,
    Commodore64,
    Intellivision,
    MacOs,
    Msx,
    NeoGeo,
    NeoGeoPocket,
    NeoGeoPocketColor,
    Nintendo3ds,
    Nintendo64,
    NintendoDs,
    FamicomDiskSystem,
    Nes,
    GameBoy,
    GameBoyAdvance,
    GameBoyColor,
    GameCube,
    Wii,
    WiiU,
    VirtualBoy,
    GameAndWatch,
    Pc,
    Sega32x,
    SegaCd,
    Dreamcast,
    GameGear,
    Genesis,
    MasterSystem,
    MegaDrive,
    Saturn,
    Sg1000,
    PlayStation,
    PlayStation2,
    PlayStation3,
    PlayStationVita,
    PlayStationPortable,
    Snes,
    TurboGrafx16,
    WonderSwan,
    WonderSwanColor,
    ZxSpectrum,
    Vectrex,
    /// Systems that should not be scraped.
    Ignore,
}

/// Every platform with its configuration name.
const NAMES: &[(PlatformId, &str)] = &[
    (PlatformId::ThreeDo, "3do"),
    (PlatformId::Amiga, "amiga"),
    (PlatformId::AmstradCpc, "amstradcpc"),
    (PlatformId::AppleII, "apple2"),
    (PlatformId::Arcade, "arcade"),
    (PlatformId::Atari800, "atari800"),
    (PlatformId::Atari2600, "atari2600"),
    (PlatformId::Atari5200, "atari5200"),
    (PlatformId::Atari7800, "atari7800"),
    (PlatformId::AtariJaguar, "atarijaguar"),
    (PlatformId::AtariLynx, "atarilynx"),
    (PlatformId::AtariSt, "atarist"),
    (PlatformId::ColecoVision, "colecovision"),
    (PlatformId::Commodore64, "c64"),
    (PlatformId::Intellivision, "intellivision"),
    (PlatformId::MacOs, "macintosh"),
    (PlatformId::Msx, "msx"),
    (PlatformId::NeoGeo, "neogeo"),
    (PlatformId::NeoGeoPocket, "ngp"),
    (PlatformId::NeoGeoPocketColor, "ngpc"),
    (PlatformId::Nintendo3ds, "n3ds"),
    (PlatformId::Nintendo64, "n64"),
    (PlatformId::NintendoDs, "nds"),
    (PlatformId::FamicomDiskSystem, "fds"),
    (PlatformId::Nes, "nes"),
    (PlatformId::GameBoy, "gb"),
    (PlatformId::GameBoyAdvance, "gba"),
    (PlatformId::GameBoyColor, "gbc"),
    (PlatformId::GameCube, "gc"),
    (PlatformId::Wii, "wii"),
    (PlatformId::WiiU, "wiiu"),
    (PlatformId::VirtualBoy, "virtualboy"),
    (PlatformId::GameAndWatch, "gameandwatch"),
    (PlatformId::Pc, "pc"),
    (PlatformId::Sega32x, "sega32x"),
    (PlatformId::SegaCd, "segacd"),
    (PlatformId::Dreamcast, "dreamcast"),
    (PlatformId::GameGear, "gamegear"),
    (PlatformId::Genesis, "genesis"),
    (PlatformId::MasterSystem, "mastersystem"),
    (PlatformId::MegaDrive, "megadrive"),
    (PlatformId::Saturn, "saturn"),
    (PlatformId::Sg1000, "sg-1000"),
    (PlatformId::PlayStation, "psx"),
    (PlatformId::PlayStation2, "ps2"),
    (PlatformId::PlayStation3, "ps3"),
    (PlatformId::PlayStationVita, "psvita"),
    (PlatformId::PlayStationPortable, "psp"),
    (PlatformId::Snes, "snes"),
    (PlatformId::TurboGrafx16, "pcengine"),
    (PlatformId::WonderSwan, "wonderswan"),
    (PlatformId::WonderSwanColor, "wonderswancolor"),
    (PlatformId::ZxSpectrum, "zxspectrum"),
    (PlatformId::Vectrex, "vectrex"),
    (PlatformId::Ignore, "ignore"),
];

impl PlatformId {
    /// Looks up a platform by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES.iter().find(|(_, n)| *n == name).map(|&(id, _)| id)
    }

    /// Configuration name of the platform.
    #[must_use]
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|&&(id, _)| id == self)
            .map_or("unknown", |&(_, n)| n)
    }

    /// Every known platform.
    pub fn all() -> impl Iterator<Item = Self> {
        NAMES.iter().map(|&(id, _)| id)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
