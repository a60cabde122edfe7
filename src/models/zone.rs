use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An e-Solat prayer-time region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Zone {
    pub code: &'static str,
    pub name: &'static str,
    pub state: &'static str,
}

impl Zone {
    pub fn find(code: &str) -> Option<&'static Zone> {
        MALAYSIAN_ZONES
            .iter()
            .find(|z| z.code.eq_ignore_ascii_case(code.trim()))
    }

    /// Case-insensitive substring match over code, name and state.
    pub fn search(query: &str) -> Vec<&'static Zone> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return MALAYSIAN_ZONES.iter().collect();
        }
        MALAYSIAN_ZONES
            .iter()
            .filter(|z| {
                z.code.to_lowercase().contains(&q)
                    || z.name.to_lowercase().contains(&q)
                    || z.state.to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn default_zone() -> &'static Zone {
        &MALAYSIAN_ZONES[0]
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.code, self.name, self.state)
    }
}

/// Serde adapter storing a zone as its full record and resolving it back
/// through the static table by code. A code missing from the table falls
/// back to the default zone so the rest of the record survives.
pub mod by_code {
    use super::*;
    use log::warn;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredZone {
        Record { code: String },
        Code(String),
        Other(serde::de::IgnoredAny),
    }

    pub fn serialize<S: Serializer>(zone: &&'static Zone, s: S) -> Result<S::Ok, S::Error> {
        zone.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<&'static Zone, D::Error> {
        let code = match StoredZone::deserialize(d)? {
            StoredZone::Record { code } | StoredZone::Code(code) => code,
            StoredZone::Other(_) => {
                warn!("Stored zone has no code, using {}", Zone::default_zone().code);
                return Ok(Zone::default_zone());
            }
        };
        Ok(Zone::find(&code).unwrap_or_else(|| {
            warn!(
                "Unknown stored zone '{}', using {}",
                code,
                Zone::default_zone().code
            );
            Zone::default_zone()
        }))
    }
}

pub static MALAYSIAN_ZONES: &[Zone] = &[
    Zone { code: "JHR01", name: "Pulau Aur dan Pulau Pemanggil", state: "Johor" },
    Zone { code: "JHR02", name: "Johor Bahru, Kota Tinggi, Mersing, Kulai", state: "Johor" },
    Zone { code: "JHR03", name: "Kluang, Pontian", state: "Johor" },
    Zone { code: "JHR04", name: "Batu Pahat, Muar, Segamat, Gemas Johor, Tangkak", state: "Johor" },
    Zone { code: "KDH01", name: "Kota Setar, Kubang Pasu, Pokok Sena (Daerah Kecil)", state: "Kedah" },
    Zone { code: "KDH02", name: "Kuala Muda, Yan, Pendang", state: "Kedah" },
    Zone { code: "KDH03", name: "Padang Terap, Sik", state: "Kedah" },
    Zone { code: "KDH04", name: "Baling", state: "Kedah" },
    Zone { code: "KDH05", name: "Bandar Baharu, Kulim", state: "Kedah" },
    Zone { code: "KDH06", name: "Langkawi", state: "Kedah" },
    Zone { code: "KDH07", name: "Puncak Gunung Jerai", state: "Kedah" },
    Zone { code: "KTN01", name: "Bachok, Kota Bharu, Machang, Pasir Mas, Pasir Puteh, Tanah Merah, Tumpat, Kuala Krai, Mukim Chiku", state: "Kelantan" },
    Zone { code: "KTN02", name: "Gua Musang (Daerah Galas Dan Bertam), Jeli, Jajahan Kecil Lojing", state: "Kelantan" },
    Zone { code: "MLK01", name: "SELURUH NEGERI MELAKA", state: "Melaka" },
    Zone { code: "NGS01", name: "Tampin, Jempol", state: "Negeri Sembilan" },
    Zone { code: "NGS02", name: "Jelebu, Kuala Pilah, Rembau", state: "Negeri Sembilan" },
    Zone { code: "NGS03", name: "Port Dickson, Seremban", state: "Negeri Sembilan" },
    Zone { code: "PHG01", name: "Pulau Tioman", state: "Pahang" },
    Zone { code: "PHG02", name: "Kuantan, Pekan, Muadzam Shah", state: "Pahang" },
    Zone { code: "PHG03", name: "Jerantut, Temerloh, Maran, Bera, Chenor, Jengka", state: "Pahang" },
    Zone { code: "PHG04", name: "Bentong, Lipis, Raub", state: "Pahang" },
    Zone { code: "PHG05", name: "Genting Sempah, Janda Baik, Bukit Tinggi", state: "Pahang" },
    Zone { code: "PHG06", name: "Cameron Highlands, Genting Higlands, Bukit Fraser", state: "Pahang" },
    Zone { code: "PHG07", name: "Zon Khas Daerah Rompin, (Mukim Rompin, Mukim Endau, Mukim Pontian)", state: "Pahang" },
    Zone { code: "PLS01", name: "Kangar, Padang Besar, Arau", state: "Perlis" },
    Zone { code: "PNG01", name: "Seluruh Negeri Pulau Pinang", state: "Pulau Pinang" },
    Zone { code: "PRK01", name: "Tapah, Slim River, Tanjung Malim", state: "Perak" },
    Zone { code: "PRK02", name: "Kuala Kangsar, Sg. Siput , Ipoh, Batu Gajah, Kampar", state: "Perak" },
    Zone { code: "PRK03", name: "Lenggong, Pengkalan Hulu, Grik", state: "Perak" },
    Zone { code: "PRK04", name: "Temengor, Belum", state: "Perak" },
    Zone { code: "PRK05", name: "Kg Gajah, Teluk Intan, Bagan Datuk, Seri Iskandar, Beruas, Parit, Lumut, Sitiawan, Pulau Pangkor", state: "Perak" },
    Zone { code: "PRK06", name: "Selama, Taiping, Bagan Serai, Parit Buntar", state: "Perak" },
    Zone { code: "PRK07", name: "Bukit Larut", state: "Perak" },
    Zone { code: "SBH01", name: "Bahagian Sandakan (Timur), Bukit Garam, Semawang, Temanggong, Tambisan, Bandar Sandakan, Sukau", state: "Sabah" },
    Zone { code: "SBH02", name: "Beluran, Telupid, Pinangah, Terusan, Kuamut, Bahagian Sandakan (Barat)", state: "Sabah" },
    Zone { code: "SBH03", name: "Lahad Datu, Silabukan, Kunak, Sahabat, Semporna, Tungku, Bahagian Tawau  (Timur)", state: "Sabah" },
    Zone { code: "SBH04", name: "Bandar Tawau, Balong, Merotai, Kalabakan, Bahagian Tawau (Barat)", state: "Sabah" },
    Zone { code: "SBH05", name: "Kudat, Kota Marudu, Pitas, Pulau Banggi, Bahagian Kudat", state: "Sabah" },
    Zone { code: "SBH06", name: "Gunung Kinabalu", state: "Sabah" },
    Zone { code: "SBH07", name: "Kota Kinabalu, Ranau, Kota Belud, Tuaran, Penampang, Papar, Putatan, Bahagian Pantai Barat", state: "Sabah" },
    Zone { code: "SBH08", name: "Pensiangan, Keningau, Tambunan, Nabawan, Bahagian Pendalaman (Atas)", state: "Sabah" },
    Zone { code: "SBH09", name: "Beaufort, Kuala Penyu, Sipitang, Tenom, Long Pasia, Membakut, Weston, Bahagian Pendalaman (Bawah)", state: "Sabah" },
    Zone { code: "SGR01", name: "Gombak, Petaling, Sepang, Hulu Langat, Hulu Selangor, S.Alam", state: "Selangor" },
    Zone { code: "SGR02", name: "Kuala Selangor, Sabak Bernam", state: "Selangor" },
    Zone { code: "SGR03", name: "Klang, Kuala Langat", state: "Selangor" },
    Zone { code: "SWK01", name: "Limbang, Lawas, Sundar, Trusan", state: "Sarawak" },
    Zone { code: "SWK02", name: "Miri, Niah, Bekenu, Sibuti, Marudi", state: "Sarawak" },
    Zone { code: "SWK03", name: "Pandan, Belaga, Suai, Tatau, Sebauh, Bintulu", state: "Sarawak" },
    Zone { code: "SWK04", name: "Sibu, Mukah, Dalat, Song, Igan, Oya, Balingian, Kanowit, Kapit", state: "Sarawak" },
    Zone { code: "SWK05", name: "Sarikei, Matu, Julau, Rajang, Daro, Bintangor, Belawai", state: "Sarawak" },
    Zone { code: "SWK06", name: "Lubok Antu, Sri Aman, Roban, Debak, Kabong, Lingga, Engkelili, Betong, Spaoh, Pusa, Saratok", state: "Sarawak" },
    Zone { code: "SWK07", name: "Serian, Simunjan, Samarahan, Sebuyau, Meludam", state: "Sarawak" },
    Zone { code: "SWK08", name: "Kuching, Bau, Lundu, Sematan", state: "Sarawak" },
    Zone { code: "SWK09", name: "Zon Khas (Kampung Patarikan)", state: "Sarawak" },
    Zone { code: "TRG01", name: "Kuala Terengganu, Marang, Kuala Nerus", state: "Terengganu" },
    Zone { code: "TRG02", name: "Besut, Setiu", state: "Terengganu" },
    Zone { code: "TRG03", name: "Hulu Terengganu", state: "Terengganu" },
    Zone { code: "TRG04", name: "Dungun, Kemaman", state: "Terengganu" },
    Zone { code: "WLY01", name: "Kuala Lumpur, Putrajaya", state: "Wilayah Persekutuan" },
    Zone { code: "WLY02", name: "Labuan", state: "Wilayah Persekutuan" },
];
