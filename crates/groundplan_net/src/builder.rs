//! Topology builder: validate, then synthesize in one pass.

use crate::acl::NetworkAcl;
use crate::config::{NatConfig, NatInstanceIngress, SubnetDivision, TopologyConfig};
use crate::nat::{
    DEFAULT_NAT_INSTANCE_TYPE, NatBoundaryIngress, NatGateway, NatInstance, NatResources,
    NatSecurityBoundary, nat_machine_image,
};
use crate::route::{Destination, RouteTable, RouteTarget};
use crate::subnet::Subnet;
use crate::topology::{Topology, Vpc};
use groundplan_core::{
    CidrError, CoreError, EipId, GatewayId, GroupId, InstanceId, NatGatewayId, NetworkAclId,
    RouteTableId, SubnetId, SubnetRole, SynthContext, Tags, VpcId, derive_subnet_ipv6,
    provider_assigned_block,
};
use ipnet::Ipv6Net;
use tracing::debug;

/// Topology build errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A configuration list has the wrong number of entries
    #[error("{what} must have exactly {expected} entries, got {actual}")]
    Cardinality {
        /// What was miscounted
        what: String,
        /// Required count
        expected: usize,
        /// Provided count
        actual: usize,
    },

    /// IPv6 derivation failed
    #[error(transparent)]
    Cidr(#[from] CidrError),
}

impl From<TopologyError> for CoreError {
    fn from(err: TopologyError) -> Self {
        match err {
            TopologyError::Cardinality {
                what,
                expected,
                actual,
            } => CoreError::Cardinality {
                what,
                expected,
                actual,
            },
            TopologyError::Cidr(err) => CoreError::InvalidCidr(err),
        }
    }
}

/// Builds a [`Topology`] from a [`TopologyConfig`].
///
/// The build is transactional: all validation and derivation happen before
/// any entity is assembled, so a failed build leaves nothing behind.
pub struct TopologyBuilder<'a> {
    ctx: &'a SynthContext,
}

impl<'a> TopologyBuilder<'a> {
    /// Create a builder for the given synthesis context
    #[must_use]
    pub fn new(ctx: &'a SynthContext) -> Self {
        Self { ctx }
    }

    /// Build the topology.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Cardinality`] when the AZ list or any
    /// subnet-division CIDR list does not have exactly 3 entries, and
    /// [`TopologyError::Cidr`] when the IPv6 block cannot be subdivided.
    pub fn build(&self, config: &TopologyConfig) -> Result<Topology, TopologyError> {
        validate(config)?;

        let scope = self.ctx.scope.as_str();
        let vpc_id = VpcId::from_name(scope, "vpc");
        let ipv6_block = config
            .ipv6_block
            .unwrap_or_else(|| provider_assigned_block(vpc_id));

        // Derive every /64 up front so a bad block fails the whole build
        // before a single entity exists.
        let ipv6_cidrs = derive_all_ipv6(ipv6_block)?;

        let internet_gateway = GatewayId::from_name(scope, "internet-gateway");
        let egress_only_gateway = GatewayId::from_name(scope, "egress-only-internet-gateway");
        let network_acl = NetworkAcl::baseline(NetworkAclId::from_name(scope, "network-acl"));

        // NAT resources are placed into the public subnets, whose IDs are
        // name-derived and therefore known before the subnets exist.
        let public_ids: Vec<SubnetId> = (0..3)
            .map(|i| SubnetId::from_name(scope, &format!("public-subnet-{i}")))
            .collect();
        let nat = self.build_nat(config, &public_ids);

        let subnets = SubnetDivision {
            public: self.build_division(
                config,
                SubnetRole::Public,
                &ipv6_cidrs.public,
                &nat,
                internet_gateway,
                egress_only_gateway,
            ),
            private: self.build_division(
                config,
                SubnetRole::Private,
                &ipv6_cidrs.private,
                &nat,
                internet_gateway,
                egress_only_gateway,
            ),
            isolated: self.build_division(
                config,
                SubnetRole::Isolated,
                &ipv6_cidrs.isolated,
                &nat,
                internet_gateway,
                egress_only_gateway,
            ),
        };

        let topology = Topology {
            vpc: Vpc {
                id: vpc_id,
                ipv4_cidr: config.cidrs.vpc,
                ipv6_block,
                enable_dns_support: true,
                enable_dns_hostnames: true,
            },
            availability_zones: config.availability_zones.clone(),
            internet_gateway,
            egress_only_gateway,
            network_acl,
            subnets,
            nat,
        };

        debug!(
            vpc = %topology.vpc.id,
            subnets = topology.subnet_count(),
            strategy = ?topology.nat_strategy(),
            "synthesized topology"
        );

        Ok(topology)
    }

    fn build_nat(&self, config: &TopologyConfig, public_ids: &[SubnetId]) -> NatResources {
        let scope = self.ctx.scope.as_str();
        match &config.nat {
            NatConfig::Gateway => {
                let gateways = (0..3)
                    .map(|i| NatGateway {
                        id: NatGatewayId::from_name(scope, &format!("nat-gateway-{i}")),
                        allocation: EipId::from_name(scope, &format!("nat-gateway-eip-{i}")),
                        subnet: public_ids[i],
                    })
                    .collect();
                NatResources::Gateway { gateways }
            }
            NatConfig::Instance {
                instance_type,
                ingress,
            } => {
                let security_boundary = NatSecurityBoundary {
                    id: GroupId::from_name(scope, "nat-instance-security-group"),
                    name: "nat-instance-security-group".to_string(),
                    ingress: match ingress {
                        NatInstanceIngress::Unreachable => NatBoundaryIngress::Unreachable,
                        NatInstanceIngress::FromVpc => NatBoundaryIngress::FromVpc(config.cidrs.vpc),
                    },
                };
                let image = nat_machine_image(&self.ctx.region);
                let instances = (0..3)
                    .map(|i| NatInstance {
                        id: InstanceId::from_name(scope, &format!("nat-instance-{i}")),
                        image: image.clone(),
                        instance_type: instance_type
                            .clone()
                            .unwrap_or_else(|| DEFAULT_NAT_INSTANCE_TYPE.to_string()),
                        subnet: public_ids[i],
                        monitoring: true,
                        key_name: self.ctx.key_name.clone(),
                        instance_profile: self
                            .ctx
                            .instance_profile
                            .as_ref()
                            .map(|p| p.name.clone()),
                        tags: Tags::named(format!("NAT Instance {i}")),
                    })
                    .collect();
                NatResources::Instance {
                    security_boundary,
                    instances,
                }
            }
        }
    }

    fn build_division(
        &self,
        config: &TopologyConfig,
        role: SubnetRole,
        ipv6_cidrs: &[Ipv6Net; 3],
        nat: &NatResources,
        internet_gateway: GatewayId,
        egress_only_gateway: GatewayId,
    ) -> Vec<Subnet> {
        let scope = self.ctx.scope.as_str();
        let cidrs = config.cidrs.subnets.get(role);

        (0..3)
            .map(|i| {
                let mut route_table = RouteTable::new(
                    RouteTableId::from_name(scope, &format!("{}-route-table-{i}", role.name())),
                    match role {
                        SubnetRole::Public => Tags::named(format!("Public Route Table {i}")),
                        _ => Tags::new(),
                    },
                );
                match role {
                    SubnetRole::Public => {
                        route_table.add_route(
                            Destination::any_ipv4(),
                            RouteTarget::InternetGateway(internet_gateway),
                        );
                        route_table.add_route(
                            Destination::any_ipv6(),
                            RouteTarget::InternetGateway(internet_gateway),
                        );
                    }
                    SubnetRole::Private => {
                        let target = match nat {
                            NatResources::Gateway { gateways } => {
                                RouteTarget::NatGateway(gateways[i].id)
                            }
                            NatResources::Instance { instances, .. } => {
                                RouteTarget::Instance(instances[i].id)
                            }
                        };
                        route_table.add_route(Destination::any_ipv4(), target);
                        route_table.add_route(
                            Destination::any_ipv6(),
                            RouteTarget::EgressOnlyGateway(egress_only_gateway),
                        );
                    }
                    SubnetRole::Isolated => {}
                }

                let tags = match role {
                    SubnetRole::Public => {
                        Tags::named(format!("Public Subnet {i}")).with("kubernetes.io/role/elb", "1")
                    }
                    SubnetRole::Private => Tags::named(format!("Private Subnet {i}"))
                        .with("kubernetes.io/role/internal-elb", "1"),
                    SubnetRole::Isolated => Tags::named(format!("Isolated Subnet {i}")),
                };

                Subnet {
                    id: SubnetId::from_name(scope, &format!("{}-subnet-{i}", role.name())),
                    availability_zone: config.availability_zones[i].clone(),
                    role,
                    ipv4_cidr: cidrs[i],
                    ipv6_cidr: ipv6_cidrs[i],
                    assign_ipv6_on_creation: role == SubnetRole::Public,
                    map_public_ip_on_launch: role == SubnetRole::Public,
                    tags,
                    route_table,
                }
            })
            .collect()
    }
}

fn validate(config: &TopologyConfig) -> Result<(), TopologyError> {
    if config.availability_zones.len() != 3 {
        return Err(TopologyError::Cardinality {
            what: "availability zones".to_string(),
            expected: 3,
            actual: config.availability_zones.len(),
        });
    }
    for (role, cidrs) in config.cidrs.subnets.iter() {
        if cidrs.len() != 3 {
            return Err(TopologyError::Cardinality {
                what: format!("{role} subnet CIDRs"),
                expected: 3,
                actual: cidrs.len(),
            });
        }
    }
    Ok(())
}

fn derive_all_ipv6(block: Ipv6Net) -> Result<SubnetDivision<[Ipv6Net; 3]>, CidrError> {
    let derive_role = |role: SubnetRole| -> Result<[Ipv6Net; 3], CidrError> {
        Ok([
            derive_subnet_ipv6(block, role, 0)?,
            derive_subnet_ipv6(block, role, 1)?,
            derive_subnet_ipv6(block, role, 2)?,
        ])
    };
    Ok(SubnetDivision {
        public: derive_role(SubnetRole::Public)?,
        private: derive_role(SubnetRole::Private)?,
        isolated: derive_role(SubnetRole::Isolated)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn ctx() -> SynthContext {
        SynthContext::new("test", "us-west-2", "123456789012")
    }

    fn config(nat: NatConfig) -> TopologyConfig {
        TopologyConfig {
            availability_zones: vec![
                "us-west-2a".to_string(),
                "us-west-2b".to_string(),
                "us-west-2c".to_string(),
            ],
            cidrs: crate::config::CidrConfig {
                vpc: "10.0.0.0/16".parse().unwrap(),
                subnets: SubnetDivision {
                    public: vec![
                        "10.0.0.0/24".parse().unwrap(),
                        "10.0.1.0/24".parse().unwrap(),
                        "10.0.2.0/24".parse().unwrap(),
                    ],
                    private: vec![
                        "10.0.4.0/23".parse().unwrap(),
                        "10.0.6.0/23".parse().unwrap(),
                        "10.0.8.0/23".parse().unwrap(),
                    ],
                    isolated: vec![
                        "10.0.16.0/23".parse().unwrap(),
                        "10.0.18.0/23".parse().unwrap(),
                        "10.0.20.0/23".parse().unwrap(),
                    ],
                },
            },
            nat,
            ipv6_block: None,
        }
    }

    #[test]
    fn test_build_produces_nine_subnets() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        assert_eq!(topology.subnet_count(), 9);
        for role in SubnetRole::ALL {
            assert_eq!(topology.subnets.get(role).len(), 3);
        }
    }

    #[test]
    fn test_build_produces_nine_distinct_route_tables() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        let mut tables = BTreeSet::new();
        for role in SubnetRole::ALL {
            for subnet in topology.subnets.get(role) {
                tables.insert(subnet.route_table.id);
            }
        }
        assert_eq!(tables.len(), 9);
    }

    #[test]
    fn test_wrong_az_count_rejected() {
        let ctx = ctx();
        for count in [2usize, 4] {
            let mut cfg = config(NatConfig::Gateway);
            cfg.availability_zones.truncate(count.min(3));
            while cfg.availability_zones.len() < count {
                cfg.availability_zones.push("us-west-2d".to_string());
            }
            let err = TopologyBuilder::new(&ctx).build(&cfg).unwrap_err();
            assert_eq!(
                err,
                TopologyError::Cardinality {
                    what: "availability zones".to_string(),
                    expected: 3,
                    actual: count,
                }
            );
        }
    }

    #[test]
    fn test_wrong_division_count_names_division() {
        let ctx = ctx();
        let mut cfg = config(NatConfig::Gateway);
        cfg.cidrs.subnets.private.pop();
        let err = TopologyBuilder::new(&ctx).build(&cfg).unwrap_err();
        assert_eq!(
            err,
            TopologyError::Cardinality {
                what: "private subnet CIDRs".to_string(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let ctx = ctx();
        let cfg = config(NatConfig::Gateway);
        let a = TopologyBuilder::new(&ctx).build(&cfg).unwrap();
        let b = TopologyBuilder::new(&ctx).build(&cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_public_subnets_route_to_internet_gateway() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        for subnet in &topology.subnets.public {
            assert!(subnet.route_table.has_default_ipv4());
            assert!(subnet.route_table.has_default_ipv6());
            assert!(subnet.route_table.routes.iter().all(|r| matches!(
                r.target,
                RouteTarget::InternetGateway(id) if id == topology.internet_gateway
            )));
            assert!(subnet.assign_ipv6_on_creation);
            assert!(subnet.map_public_ip_on_launch);
        }
    }

    #[test]
    fn test_isolated_subnets_have_no_routes() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        for subnet in &topology.subnets.isolated {
            assert!(subnet.route_table.routes.is_empty());
            assert!(!subnet.assign_ipv6_on_creation);
            assert!(!subnet.map_public_ip_on_launch);
        }
    }

    #[test]
    fn test_gateway_strategy_resources() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        match &topology.nat {
            NatResources::Gateway { gateways } => {
                assert_eq!(gateways.len(), 3);
                let allocations: BTreeSet<_> = gateways.iter().map(|g| g.allocation).collect();
                assert_eq!(allocations.len(), 3);
                // Each gateway sits in the matching public subnet
                for (i, gateway) in gateways.iter().enumerate() {
                    assert_eq!(gateway.subnet, topology.subnets.public[i].id);
                }
            }
            NatResources::Instance { .. } => panic!("expected gateway NAT resources"),
        }
    }

    #[test]
    fn test_instance_strategy_resources() {
        let ctx = ctx();
        let cfg = config(NatConfig::Instance {
            instance_type: None,
            ingress: NatInstanceIngress::Unreachable,
        });
        let topology = TopologyBuilder::new(&ctx).build(&cfg).unwrap();
        match &topology.nat {
            NatResources::Instance {
                security_boundary,
                instances,
            } => {
                assert_eq!(instances.len(), 3);
                assert_eq!(security_boundary.name, "nat-instance-security-group");
                assert_eq!(security_boundary.ingress, NatBoundaryIngress::Unreachable);
                for (i, instance) in instances.iter().enumerate() {
                    assert_eq!(instance.instance_type, DEFAULT_NAT_INSTANCE_TYPE);
                    assert_eq!(instance.subnet, topology.subnets.public[i].id);
                    assert!(instance.monitoring);
                }
            }
            NatResources::Gateway { .. } => panic!("expected instance NAT resources"),
        }
    }

    #[test]
    fn test_instance_ingress_from_vpc() {
        let ctx = ctx();
        let cfg = config(NatConfig::Instance {
            instance_type: Some("t3.micro".to_string()),
            ingress: NatInstanceIngress::FromVpc,
        });
        let topology = TopologyBuilder::new(&ctx).build(&cfg).unwrap();
        match &topology.nat {
            NatResources::Instance {
                security_boundary,
                instances,
            } => {
                assert_eq!(
                    security_boundary.ingress,
                    NatBoundaryIngress::FromVpc("10.0.0.0/16".parse().unwrap())
                );
                assert!(instances.iter().all(|i| i.instance_type == "t3.micro"));
            }
            NatResources::Gateway { .. } => panic!("expected instance NAT resources"),
        }
    }

    #[test]
    fn test_private_subnets_route_through_nat() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        let NatResources::Gateway { gateways } = &topology.nat else {
            panic!("expected gateway NAT resources");
        };
        for (i, subnet) in topology.subnets.private.iter().enumerate() {
            assert!(subnet.route_table.has_default_ipv4());
            assert!(subnet.route_table.has_default_ipv6());
            assert!(subnet.route_table.routes.contains(&crate::route::Route {
                destination: Destination::any_ipv4(),
                target: RouteTarget::NatGateway(gateways[i].id),
            }));
            assert!(subnet.route_table.routes.contains(&crate::route::Route {
                destination: Destination::any_ipv6(),
                target: RouteTarget::EgressOnlyGateway(topology.egress_only_gateway),
            }));
        }
    }

    #[test]
    fn test_ipv6_cidrs_distinct_and_contained() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        let mut seen = BTreeSet::new();
        for role in SubnetRole::ALL {
            for subnet in topology.subnets.get(role) {
                assert!(topology.vpc.ipv6_block.contains(&subnet.ipv6_cidr));
                assert_eq!(subnet.ipv6_cidr.prefix_len(), 64);
                assert!(seen.insert(subnet.ipv6_cidr));
            }
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_explicit_ipv6_block_used() {
        let ctx = ctx();
        let mut cfg = config(NatConfig::Gateway);
        cfg.ipv6_block = Some("fd12:3456:789a:bc00::/56".parse().unwrap());
        let topology = TopologyBuilder::new(&ctx).build(&cfg).unwrap();
        assert_eq!(
            topology.subnets.public[0].ipv6_cidr,
            "fd12:3456:789a:bca0::/64".parse::<Ipv6Net>().unwrap()
        );
        assert_eq!(
            topology.subnets.isolated[2].ipv6_cidr,
            "fd12:3456:789a:bcc2::/64".parse::<Ipv6Net>().unwrap()
        );
    }

    #[test]
    fn test_unaligned_ipv6_block_rejected() {
        let ctx = ctx();
        let mut cfg = config(NatConfig::Gateway);
        cfg.ipv6_block = Some("fd12:3456:789a:bc00::/60".parse().unwrap());
        let err = TopologyBuilder::new(&ctx).build(&cfg).unwrap_err();
        assert!(matches!(err, TopologyError::Cidr(_)));
    }

    #[test]
    fn test_vpc_dns_flags() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        assert!(topology.vpc.enable_dns_support);
        assert!(topology.vpc.enable_dns_hostnames);
    }

    #[test]
    fn test_baseline_acl_present() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        assert_eq!(topology.network_acl.entries.len(), 5);
    }

    #[test]
    fn test_subnet_ids_accessor_order() {
        let ctx = ctx();
        let topology = TopologyBuilder::new(&ctx).build(&config(NatConfig::Gateway)).unwrap();
        let ids = topology.subnet_ids(SubnetRole::Private);
        let direct: Vec<_> = topology.subnets.private.iter().map(|s| s.id).collect();
        assert_eq!(ids, direct);
    }
}
