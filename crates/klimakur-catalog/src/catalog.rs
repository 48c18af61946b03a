//! Klimakur 2030 measure catalog
//!
//! Potentials are the published estimates for 2030 in kt CO2e. Unit costs
//! are the upper value of the published cost range; ranges reported as
//! varying carry no assessed cost.

use crate::measure::{Category, MeasureId, MeasureRecord, UnitCost};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::measure::Category::{Agriculture, Ccs, Industry, Maritime, Other, OtherTransport, Petroleum, RoadTransport};
use crate::measure::UnitCost::{Known, Unknown};

/// Compile-time catalog row
struct RawMeasure {
    title: &'static str,
    category: Category,
    potential_kt: f64,
    cost: UnitCost,
    range: &'static str,
}

const fn raw(
    title: &'static str,
    category: Category,
    potential_kt: f64,
    cost: UnitCost,
    range: &'static str,
) -> RawMeasure {
    RawMeasure {
        title,
        category,
        potential_kt,
        cost,
        range,
    }
}

// S09 is listed under both maritime and other transport; O01 is used for two
// distinct titles. Both are kept as published.
const KLIMAKUR_2030: &[RawMeasure] = &[
    // Veitransport
    raw("T01 Nullvekstmål for personbiltransporten", RoadTransport, 760.0, Known(1500.0), "500-1500"),
    raw("T02 Overføring av gods fra vei til sjø og bane", RoadTransport, 480.0, Known(2000.0), ">1500"),
    raw("T03 Forbedret logistikk for varebiltransport", RoadTransport, 420.0, Known(500.0), "<500"),
    raw("T04 Forbedret logistikk og økt effektivisering av lastebiler", RoadTransport, 1190.0, Known(500.0), "<500"),
    raw("T05 100% av nye personbiler er elektriske innen 2025", RoadTransport, 2540.0, Known(1500.0), "500-1500"),
    raw("T06 100% av nye lette varebiler er elektriske innen 2025", RoadTransport, 690.0, Known(1500.0), "500-1500"),
    raw("T07 100% av nye tyngre varebiler er elektriske innen 2030", RoadTransport, 280.0, Known(500.0), "<500"),
    raw("T08 50% av nye lastebiler er el-/hydrogen i 2030", RoadTransport, 1130.0, Known(1500.0), "500-1500"),
    raw("T09 100% av nye bybusser er elektriske innen 2025", RoadTransport, 1080.0, Known(1500.0), "500-1500"),
    raw("T10 75% av nye langdistansebusser er el-/hydrogen i 2030", RoadTransport, 170.0, Known(1500.0), "500-1500"),
    raw("T11 45% av nysalg av MC/moped er elektriske i 2030", RoadTransport, 40.0, Known(500.0), "<500"),
    raw("T12 10% av nye trekkvogner går på biogass i 2030", RoadTransport, 470.0, Known(2000.0), ">1500"),
    raw("T13 Økt bruk av avansert flytende biodrivstoff i veitransport", RoadTransport, 2550.0, Known(2000.0), ">1500"),

    // Sjøfart/fiske/havbruk
    raw("S01 Teknisk-operasjonelle tiltak (energieffektivisering)", Maritime, 130.0, Unknown, "Varierer"),
    raw("S03 Avansert biodrivstoff til skipsfart", Maritime, 1190.0, Known(2000.0), ">1500"),
    raw("S04 Landstrøm", Maritime, 830.0, Known(1500.0), "500-1500"),
    raw("S05 Tiltak på godsskip (Ammoniakk/LNG/Plug-in)", Maritime, 190.0, Known(2000.0), ">1500"),
    raw("S06 Tiltak på offshorefartøy (Hydrogen/Plug-in)", Maritime, 1020.0, Known(2000.0), ">1500"),
    raw("S07 Tiltak på fiskefartøy (Plug-in)", Maritime, 180.0, Known(2000.0), ">1500"),
    raw("S08 Tiltak på bulkskip (Ammoniakk/LNG/Plug-in)", Maritime, 90.0, Known(2000.0), ">1500"),
    raw("S09 Tiltak innen havbruk (ammoniakk/plug-in)", Maritime, 1070.0, Known(2000.0), ">1500"),
    raw("S10 Tiltak på ferger (Hydrogen/Plug-in)", Maritime, 1360.0, Known(2000.0), ">1500"),
    raw("S11 Tiltak på hurtigbåter (Hydrogen/Plug-in)", Maritime, 520.0, Known(2000.0), ">1500"),
    raw("S12 Tiltak på cruiseskip (Hydrogen/Plug-in)", Maritime, 0.0, Known(2000.0), ">1500"),
    raw("S13 Tiltak på andre spesialfartøy (Hydrogen/Plug-in)", Maritime, 50.0, Known(2000.0), ">1500"),

    // Annen transport
    raw("AT01 Effektivisering maskiner på bygg/anlegg", OtherTransport, 420.0, Known(500.0), "<500"),
    raw("AT02 70% av nye ikke-veigående maskiner/kjøretøy er elektriske (2030)", OtherTransport, 1750.0, Known(2000.0), ">1500"),
    raw("AT03 Nullutslippsløsninger for jernbane", OtherTransport, 230.0, Known(500.0), "<500"),
    raw("AT04 Elektrifisering av fritidsbåter", OtherTransport, 30.0, Known(2000.0), ">1500"),
    raw("AT05 Avansert flytende biodrivstoff i avgiftsfri diesel", OtherTransport, 1890.0, Known(2000.0), ">1500"),
    raw("S09 Tiltak innen havbruk (ammoniakk/plug-in)", OtherTransport, 850.0, Known(2000.0), ">1500"),
    raw("O01 Utfasing av mineralolje/gass til byggvarme på byggeplasser", OtherTransport, 760.0, Known(500.0), "<500"),

    // Jordbruk
    raw("J01 Overgang fra rødt kjøtt til plantebasert kost og fisk", Agriculture, 2890.0, Known(500.0), "<500"),
    raw("J02 Redusert matsvinn", Agriculture, 1530.0, Known(500.0), "<500"),
    raw("J03 Husdyrgjødsel til biogass", Agriculture, 250.0, Known(2000.0), ">1500"),
    raw("J04 Diverse gjødseltiltak", Agriculture, 330.0, Known(2000.0), ">1500"),
    raw("J05 Stans i nydyrking av myr", Agriculture, 120.0, Known(500.0), "<500"),

    // Industri/bergverk
    raw("I01 Energieffektivisering i annen industri og bergverk", Industry, 300.0, Known(500.0), "<500"),
    raw("I02 Konvertering til elkraft i annen industri og bergverk", Industry, 610.0, Known(1500.0), "500-1500"),
    raw("I03 Konvertering til biobrensel i annen industri og bergverk", Industry, 150.0, Known(1500.0), "500-1500"),
    raw("I04 Konvertering til fjernvarme i annen industri og bergverk", Industry, 20.0, Known(500.0), "<500"),
    raw("I05 Konvertering til hydrogen i annen industri og bergverk", Industry, 10.0, Known(2000.0), ">1500"),
    raw("I06 Fast biomasse i asfaltindustrien", Industry, 520.0, Known(500.0), "<500"),
    raw("I07 Konvertering i metallurgisk industri", Industry, 110.0, Known(1500.0), "500-1500"),
    raw("I08 Konvertering i kjemisk industri", Industry, 80.0, Known(1500.0), "500-1500"),
    raw("I09 Økt andel trekull i silisiumkarbidindustrien", Industry, 40.0, Known(500.0), "<500"),
    raw("I10 Reduserte lystgassutslipp fra kunstgjødselproduksjon", Industry, 830.0, Known(500.0), "<500"),

    // Petroleum
    raw("P01 Økt gjenvinning av metan/NMVOC ved råoljelasting offshore", Petroleum, 280.0, Known(1500.0), "500-1500"),
    raw("P02 Reduksjon av metan/NMVOC fra kaldventilering offshore", Petroleum, 1160.0, Known(1500.0), "500-1500"),
    raw("P03 Reduksjon av metan/NMVOC fra petroleumsanlegg på land", Petroleum, 230.0, Known(2000.0), ">1500"),

    // CCS
    raw("E01 CCS på Oslo Fortum Varme (Klemetsrud)", Ccs, 1300.0, Known(1500.0), "500-1500"),
    raw("E02 CCS på BIR (Bergen)", Ccs, 260.0, Known(1500.0), "500-1500"),
    raw("E03 CCS på Heimdal (Trondheim)", Ccs, 260.0, Known(1500.0), "500-1500"),

    // Andre tiltak
    raw("E04 Erstatte olje/gass i fjernvarme med fornybar", Other, 20.0, Known(2000.0), ">1500"),
    raw("O01 Utfasing av mineralolje/gass til byggvarme (permanent)", Other, 140.0, Known(500.0), "<500"),
    raw("O02 Erstatte gassbruk til permanent oppvarming av bygg", Other, 950.0, Known(2000.0), ">1500"),
    raw("O03 Forsert utskifting av vedovner", Other, 510.0, Known(500.0), "<500"),
    raw("E05 Erstatte kullkraft med fornybar i Longyearbyen", Other, 430.0, Known(500.0), "<500"),
    raw("F01 Økt innsamling/destruksjon av brukt HFK", Other, 650.0, Known(500.0), "<500"),
    raw("E06 Økt utsortering av brukte tekstiler til materialgjenvinning", Other, 200.0, Known(500.0), "<500"),
    raw("E07 Økt utsortering av plastavfall til materialgjenvinning", Other, 400.0, Known(2000.0), ">1500"),
    raw("A01 Økt uttak av metan fra avfallsdeponi", Other, 760.0, Known(500.0), "<500"),

    // Aggregate of measures assessed at zero cost
    raw("Diverse nulltiltak", Other, 3900.0, Known(0.0), "<500"),
];

static KLIMAKUR: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(
        KLIMAKUR_2030
            .iter()
            .map(|r| MeasureRecord::from_static(r.title, r.category, r.potential_kt, r.cost, r.range))
            .collect(),
    )
});

/// Ordered, immutable list of measures
///
/// Index order is significant: it is the fallback display order and the
/// reference frame for encoded selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    records: Vec<MeasureRecord>,
}

impl Catalog {
    /// Create catalog from records (order preserved)
    #[inline]
    #[must_use]
    pub fn new(records: Vec<MeasureRecord>) -> Self {
        Self { records }
    }

    /// The built-in Klimakur 2030 catalog
    #[must_use]
    pub fn klimakur() -> &'static Catalog {
        &KLIMAKUR
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in catalog order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[MeasureRecord] {
        &self.records
    }

    /// Iterate rows in catalog order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, MeasureRecord> {
        self.records.iter()
    }

    /// Row at catalog index
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MeasureRecord> {
        self.records.get(index)
    }

    /// Titles in catalog order (duplicates included)
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(MeasureRecord::title)
    }

    /// True if any row carries this exact title
    #[must_use]
    pub fn contains_title(&self, title: &str) -> bool {
        self.records.iter().any(|m| m.title() == title)
    }

    /// Rows (with index) carrying the given code
    pub fn find_by_id<'a>(&'a self, id: &'a MeasureId) -> impl Iterator<Item = (usize, &'a MeasureRecord)> + 'a {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, m)| m.id() == Some(id))
    }

    /// Categories in order of first appearance
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for m in &self.records {
            if !seen.contains(&m.category()) {
                seen.push(m.category());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MeasureRecord;
    type IntoIter = std::slice::Iter<'a, MeasureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
