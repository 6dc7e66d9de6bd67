use ip_space::{
	IpNet,
	IpRange,
	ip::{
		Ip4Net,
		Ip4Range,
		Ip6Range,
		IpMask
	},
	util::PartialEnum
};

const R4: &str = "10.33.45.19-10.33.45.76";
const R6: &str = "2001:1f2d:c587:24c3:9128:3349:3cee:143-ffee:1f2d:c587:24c3:9128:3349:3cFF:FFFF";

const R4_NETS: [&str; 7] = [
	"10.33.45.19/32",
	"10.33.45.20/30",
	"10.33.45.24/29",
	"10.33.45.32/27",
	"10.33.45.64/29",
	"10.33.45.72/30",
	"10.33.45.76/32"
];

const R6_NETS: [&str; 130] = [
	"2001:1f2d:c587:24c3:9128:3349:3cee:143/128",
	"2001:1f2d:c587:24c3:9128:3349:3cee:144/126",
	"2001:1f2d:c587:24c3:9128:3349:3cee:148/125",
	"2001:1f2d:c587:24c3:9128:3349:3cee:150/124",
	"2001:1f2d:c587:24c3:9128:3349:3cee:160/123",
	"2001:1f2d:c587:24c3:9128:3349:3cee:180/121",
	"2001:1f2d:c587:24c3:9128:3349:3cee:200/119",
	"2001:1f2d:c587:24c3:9128:3349:3cee:400/118",
	"2001:1f2d:c587:24c3:9128:3349:3cee:800/117",
	"2001:1f2d:c587:24c3:9128:3349:3cee:1000/116",
	"2001:1f2d:c587:24c3:9128:3349:3cee:2000/115",
	"2001:1f2d:c587:24c3:9128:3349:3cee:4000/114",
	"2001:1f2d:c587:24c3:9128:3349:3cee:8000/113",
	"2001:1f2d:c587:24c3:9128:3349:3cef:0/112",
	"2001:1f2d:c587:24c3:9128:3349:3cf0:0/108",
	"2001:1f2d:c587:24c3:9128:3349:3d00:0/104",
	"2001:1f2d:c587:24c3:9128:3349:3e00:0/103",
	"2001:1f2d:c587:24c3:9128:3349:4000:0/98",
	"2001:1f2d:c587:24c3:9128:3349:8000:0/97",
	"2001:1f2d:c587:24c3:9128:334a::/95",
	"2001:1f2d:c587:24c3:9128:334c::/94",
	"2001:1f2d:c587:24c3:9128:3350::/92",
	"2001:1f2d:c587:24c3:9128:3360::/91",
	"2001:1f2d:c587:24c3:9128:3380::/89",
	"2001:1f2d:c587:24c3:9128:3400::/86",
	"2001:1f2d:c587:24c3:9128:3800::/85",
	"2001:1f2d:c587:24c3:9128:4000::/82",
	"2001:1f2d:c587:24c3:9128:8000::/81",
	"2001:1f2d:c587:24c3:9129::/80",
	"2001:1f2d:c587:24c3:912a::/79",
	"2001:1f2d:c587:24c3:912c::/78",
	"2001:1f2d:c587:24c3:9130::/76",
	"2001:1f2d:c587:24c3:9140::/74",
	"2001:1f2d:c587:24c3:9180::/73",
	"2001:1f2d:c587:24c3:9200::/71",
	"2001:1f2d:c587:24c3:9400::/70",
	"2001:1f2d:c587:24c3:9800::/69",
	"2001:1f2d:c587:24c3:a000::/67",
	"2001:1f2d:c587:24c3:c000::/66",
	"2001:1f2d:c587:24c4::/62",
	"2001:1f2d:c587:24c8::/61",
	"2001:1f2d:c587:24d0::/60",
	"2001:1f2d:c587:24e0::/59",
	"2001:1f2d:c587:2500::/56",
	"2001:1f2d:c587:2600::/55",
	"2001:1f2d:c587:2800::/53",
	"2001:1f2d:c587:3000::/52",
	"2001:1f2d:c587:4000::/50",
	"2001:1f2d:c587:8000::/49",
	"2001:1f2d:c588::/45",
	"2001:1f2d:c590::/44",
	"2001:1f2d:c5a0::/43",
	"2001:1f2d:c5c0::/42",
	"2001:1f2d:c600::/39",
	"2001:1f2d:c800::/37",
	"2001:1f2d:d000::/36",
	"2001:1f2d:e000::/35",
	"2001:1f2e::/31",
	"2001:1f30::/28",
	"2001:1f40::/26",
	"2001:1f80::/25",
	"2001:2000::/19",
	"2001:4000::/18",
	"2001:8000::/17",
	"2002::/15",
	"2004::/14",
	"2008::/13",
	"2010::/12",
	"2020::/11",
	"2040::/10",
	"2080::/9",
	"2100::/8",
	"2200::/7",
	"2400::/6",
	"2800::/5",
	"3000::/4",
	"4000::/2",
	"8000::/2",
	"c000::/3",
	"e000::/4",
	"f000::/5",
	"f800::/6",
	"fc00::/7",
	"fe00::/8",
	"ff00::/9",
	"ff80::/10",
	"ffc0::/11",
	"ffe0::/13",
	"ffe8::/14",
	"ffec::/15",
	"ffee::/20",
	"ffee:1000::/21",
	"ffee:1800::/22",
	"ffee:1c00::/23",
	"ffee:1e00::/24",
	"ffee:1f00::/27",
	"ffee:1f20::/29",
	"ffee:1f28::/30",
	"ffee:1f2c::/32",
	"ffee:1f2d::/33",
	"ffee:1f2d:8000::/34",
	"ffee:1f2d:c000::/38",
	"ffee:1f2d:c400::/40",
	"ffee:1f2d:c500::/41",
	"ffee:1f2d:c580::/46",
	"ffee:1f2d:c584::/47",
	"ffee:1f2d:c586::/48",
	"ffee:1f2d:c587::/51",
	"ffee:1f2d:c587:2000::/54",
	"ffee:1f2d:c587:2400::/57",
	"ffee:1f2d:c587:2480::/58",
	"ffee:1f2d:c587:24c0::/63",
	"ffee:1f2d:c587:24c2::/64",
	"ffee:1f2d:c587:24c3::/65",
	"ffee:1f2d:c587:24c3:8000::/68",
	"ffee:1f2d:c587:24c3:9000::/72",
	"ffee:1f2d:c587:24c3:9100::/75",
	"ffee:1f2d:c587:24c3:9120::/77",
	"ffee:1f2d:c587:24c3:9128::/83",
	"ffee:1f2d:c587:24c3:9128:2000::/84",
	"ffee:1f2d:c587:24c3:9128:3000::/87",
	"ffee:1f2d:c587:24c3:9128:3200::/88",
	"ffee:1f2d:c587:24c3:9128:3300::/90",
	"ffee:1f2d:c587:24c3:9128:3340::/93",
	"ffee:1f2d:c587:24c3:9128:3348::/96",
	"ffee:1f2d:c587:24c3:9128:3349::/99",
	"ffee:1f2d:c587:24c3:9128:3349:2000:0/100",
	"ffee:1f2d:c587:24c3:9128:3349:3000:0/101",
	"ffee:1f2d:c587:24c3:9128:3349:3800:0/102",
	"ffee:1f2d:c587:24c3:9128:3349:3c00:0/104"
];

#[test]
fn family_specific_load() {
	let mut rr4 = Ip4Range::default();
	let mut rr6 = Ip6Range::default();
	assert!(rr4.load(R4));
	assert!(!rr4.load(R6));
	assert!(!rr6.load(R4));
	assert!(rr6.load(R6));
}

#[test]
fn ip4_networks() {
	let range: Ip4Range = R4.parse().unwrap();
	let expected: Vec<Ip4Net> = R4_NETS.iter().map(|n| n.parse().unwrap()).collect();
	let nets: Vec<Ip4Net> = range.networks().collect();
	assert_eq!(nets, expected);

	// Same again through the family agnostic range.
	let range: IpRange = R4.parse().unwrap();
	let nets: Vec<IpNet> = range.networks().collect();
	let expected: Vec<IpNet> = expected.into_iter().map(IpNet::from).collect();
	assert_eq!(nets, expected);
}

#[test]
fn ip6_networks() {
	let range: Ip6Range = R6.parse().unwrap();
	let nets: Vec<String> = range.networks().map(|n| n.to_string()).collect();
	assert_eq!(nets.len(), 130);
	assert_eq!(nets, R6_NETS);
	assert_eq!(nets[5], "2001:1f2d:c587:24c3:9128:3349:3cee:180/121");
}

#[test]
fn networks_cover_range() {
	for text in [R4, "0.0.0.0-255.255.255.255", "0.0.0.1-255.255.255.254", "1.1.0.0-1.2.0.0", "192.168.1.1"] {
		let range: Ip4Range = text.parse().unwrap();
		let mut next = Some(range.min());
		for net in range.networks() {
			assert_eq!(Some(net.min()), next);
			assert!(net.as_range().is_subset_of(&range));
			next = PartialEnum::succ(&net.max());
		}

		if range.max() == Ip4Range::all().max() {
			assert_eq!(next, None)
		} else {
			assert_eq!(next, PartialEnum::succ(&range.max()))
		}
	}

	let all: Ip4Range = "0.0.0.0-255.255.255.255".parse().unwrap();
	assert_eq!(all.networks().count(), 1);
	assert_eq!(all.network_mask(), Some(IpMask::new(0)));

	let inner: Ip4Range = "0.0.0.1-255.255.255.254".parse().unwrap();
	assert_eq!(inner.networks().count(), 62);
}

#[test]
fn empty_range_has_no_networks() {
	assert_eq!(Ip4Range::default().networks().next(), None);
	assert_eq!(IpRange::None.networks().next(), None);
}
