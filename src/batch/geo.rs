//! Geospatial commands: GEOADD/GEOSEARCH and friends.

use crate::{
    batch::Batch,
    command::ArgBuilder,
    convert::ResponseKind,
    value::BinaryStringValue,
};

/// The unit token accepted by every geo command that measures distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl GeoUnit {
    /// The server's own unit token (`m`/`km`/`mi`/`ft`), not this enum's variant name.
    fn token(self) -> &'static str {
        match self {
            GeoUnit::Meters => "m",
            GeoUnit::Kilometers => "km",
            GeoUnit::Miles => "mi",
            GeoUnit::Feet => "ft",
        }
    }
}

impl Batch {
    /// `GEOADD key longitude latitude member [longitude latitude member...]`
    pub fn geoadd(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = (f64, f64, impl Into<BinaryStringValue>)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("GEOADD").push(key);
        for (lon, lat, member) in members {
            builder = builder.push(lon).push(lat).push(member);
        }
        self.append(builder.build(), ResponseKind::Integer)
    }

    /// `GEOPOS key member [member...]`
    pub fn geopos(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("GEOPOS").push(key).push_all(members).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `GEODIST key member1 member2 [unit]`. The unit token rendered on the wire is the
    /// server's own abbreviation, not this enum's Rust variant name.
    pub fn geodist(
        &mut self,
        key: impl Into<BinaryStringValue>,
        member1: impl Into<BinaryStringValue>,
        member2: impl Into<BinaryStringValue>,
        unit: Option<GeoUnit>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("GEODIST").push(key).push(member1).push(member2);
        if let Some(unit) = unit {
            builder = builder.push_token(unit.token());
        }
        self.append(builder.build(), ResponseKind::NullableText)
    }

    /// `GEOHASH key member [member...]`
    pub fn geohash(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("GEOHASH").push(key).push_all(members).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `GEOSEARCH key FROMMEMBER member BYRADIUS radius unit [ASC|DESC] [COUNT count]`
    pub fn geosearch_by_member_radius(
        &mut self,
        key: impl Into<BinaryStringValue>,
        member: impl Into<BinaryStringValue>,
        radius: f64,
        unit: GeoUnit,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("GEOSEARCH")
            .push(key)
            .push_token("FROMMEMBER")
            .push(member)
            .push_token("BYRADIUS")
            .push(radius)
            .push_token(unit.token());
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `GEOSEARCH key FROMLONLAT lon lat BYBOX width height unit [ASC|DESC] [COUNT count]`
    pub fn geosearch_by_lonlat_box(
        &mut self,
        key: impl Into<BinaryStringValue>,
        longitude: f64,
        latitude: f64,
        width: f64,
        height: f64,
        unit: GeoUnit,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("GEOSEARCH")
            .push(key)
            .push_token("FROMLONLAT")
            .push(longitude)
            .push(latitude)
            .push_token("BYBOX")
            .push(width)
            .push(height)
            .push_token(unit.token());
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `GEOSEARCHSTORE destination source FROMMEMBER member BYRADIUS radius unit`
    pub fn geosearchstore_by_member_radius(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        source: impl Into<BinaryStringValue>,
        member: impl Into<BinaryStringValue>,
        radius: f64,
        unit: GeoUnit,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("GEOSEARCHSTORE")
            .push(destination)
            .push(source)
            .push_token("FROMMEMBER")
            .push(member)
            .push_token("BYRADIUS")
            .push(radius)
            .push_token(unit.token())
            .build();
        self.append(cmd, ResponseKind::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geodist_renders_server_unit_abbreviation_not_variant_name() {
        let mut batch = Batch::new(false);
        batch.geodist("geo", "a", "b", Some(GeoUnit::Kilometers));
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments().last().unwrap(), &b"km".as_slice());
    }

    #[test]
    fn geoadd_flattens_lon_lat_member_triples() {
        let mut batch = Batch::new(false);
        batch.geoadd("geo", vec![(13.361389, 38.115556, "Palermo")]);
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments()[0], b"geo".as_slice());
        assert_eq!(cmd.arguments()[3], b"Palermo".as_slice());
    }
}
