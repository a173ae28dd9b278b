use crate::domain::model::{Airport, Flight, PathSearch, Route, Ticket};
use crate::utils::error::{Result, RouteError};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::{EdgeRef, Reversed};
use petgraph::Direction;
use std::collections::HashMap;

/// Directed multigraph of airports; every ticket becomes its own edge.
#[derive(Debug, Clone, Default)]
pub struct AirportGraph {
    graph: DiGraph<Airport, Flight>,
    index: HashMap<String, NodeIndex>,
}

impl AirportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tickets(tickets: &[Ticket]) -> Result<Self> {
        let mut graph = Self::new();
        for (index, ticket) in tickets.iter().enumerate() {
            graph.add_ticket(index, ticket)?;
        }
        tracing::debug!(
            "Airport graph has {} airports and {} flights",
            graph.airport_count(),
            graph.flight_count()
        );
        Ok(graph)
    }

    pub fn add_ticket(&mut self, index: usize, ticket: &Ticket) -> Result<EdgeIndex> {
        let minutes = ticket.duration().num_minutes();
        if minutes < 0 {
            return Err(RouteError::InvalidTicketError {
                index,
                reason: format!(
                    "arrival {} is before departure {}",
                    ticket.arrival(),
                    ticket.departure()
                ),
            });
        }

        let from = self.add_airport(&ticket.origin);
        let to = self.add_airport(&ticket.destination);
        let flight = Flight {
            carrier: ticket.carrier.clone(),
            duration_minutes: minutes as u64,
            price: ticket.price,
        };
        Ok(self.graph.add_edge(from, to, flight))
    }

    pub fn add_airport(&mut self, code: &str) -> NodeIndex {
        if let Some(node) = self.index.get(code) {
            return *node;
        }
        let node = self.graph.add_node(Airport::new(code));
        self.index.insert(code.to_string(), node);
        node
    }

    pub fn airport_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn flight_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    fn node(&self, code: &str) -> Result<NodeIndex> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| RouteError::UnknownAirportError {
                code: code.to_string(),
            })
    }

    /// Dijkstra over flight minutes. `Ok(None)` when the destination is unreachable.
    pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<Option<Route>> {
        let start = self.node(origin)?;
        let goal = self.node(destination)?;

        let found = petgraph::algo::astar(
            &self.graph,
            start,
            |node| node == goal,
            |edge| edge.weight().duration_minutes,
            |_| 0,
        );

        let Some((_, nodes)) = found else {
            return Ok(None);
        };

        let mut flights = Vec::with_capacity(nodes.len().saturating_sub(1));
        for pair in nodes.windows(2) {
            // Parallel edges: the fastest one is what the search relaxed.
            let edge = self
                .graph
                .edges_connecting(pair[0], pair[1])
                .min_by_key(|edge| edge.weight().duration_minutes)
                .ok_or_else(|| RouteError::ProcessingError {
                    message: format!(
                        "no flight between {} and {} on the shortest path",
                        self.graph[pair[0]], self.graph[pair[1]]
                    ),
                })?;
            flights.push(edge.weight().clone());
        }

        let airports = nodes.iter().map(|n| self.graph[*n].clone()).collect();
        Ok(Some(Route { airports, flights }))
    }

    /// Every route from origin to destination, one per distinct edge sequence.
    pub fn all_paths(
        &self,
        origin: &str,
        destination: &str,
        search: &PathSearch,
    ) -> Result<Vec<Route>> {
        let start = self.node(origin)?;
        let goal = self.node(destination)?;
        let mut routes = Vec::new();

        if start == goal || search.max_path_length == 0 || search.max_routes == 0 {
            return Ok(routes);
        }

        // Fewest flights from each airport to the destination; airports missing here never arrive.
        let hops = petgraph::algo::dijkstra(Reversed(&self.graph), goal, None, |_| 1usize);
        if !hops.contains_key(&start) {
            return Ok(routes);
        }

        // Each frame holds the outgoing edges of the node at that depth.
        let mut path: Vec<EdgeIndex> = Vec::new();
        let mut on_path = vec![false; self.graph.node_count()];
        on_path[start.index()] = true;
        let mut stack = vec![self.outgoing(start)];

        while let Some(frame) = stack.last_mut() {
            let Some(edge) = frame.pop() else {
                stack.pop();
                if let Some(edge) = path.pop() {
                    if let Some((_, target)) = self.graph.edge_endpoints(edge) {
                        on_path[target.index()] = false;
                    }
                }
                continue;
            };

            let Some((_, target)) = self.graph.edge_endpoints(edge) else {
                continue;
            };

            if search.simple_only && on_path[target.index()] {
                continue;
            }

            // Every walk kept on the stack can still reach the destination within the bound.
            let depth = path.len() + 1;
            let Some(&to_goal) = hops.get(&target) else {
                continue;
            };
            if depth + to_goal > search.max_path_length {
                continue;
            }

            if target == goal {
                path.push(edge);
                routes.push(self.route_from_edges(start, &path));
                path.pop();
                if routes.len() >= search.max_routes {
                    tracing::warn!(
                        "Stopped after {} routes from {} to {}; raise max_routes to see more",
                        routes.len(),
                        origin,
                        destination
                    );
                    break;
                }
                if search.simple_only {
                    continue;
                }
            }

            if depth >= search.max_path_length {
                continue;
            }

            path.push(edge);
            // Only simple mode reads the flag; cycle mode may enter a node twice.
            if search.simple_only {
                on_path[target.index()] = true;
            }
            stack.push(self.outgoing(target));
        }

        tracing::debug!(
            "Enumerated {} routes from {} to {}",
            routes.len(),
            origin,
            destination
        );
        Ok(routes)
    }

    fn outgoing(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        // Reversed so that popping visits edges in insertion order.
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| edge.id())
            .collect();
        edges.sort_unstable_by(|a, b| b.cmp(a));
        edges
    }

    fn route_from_edges(&self, start: NodeIndex, edges: &[EdgeIndex]) -> Route {
        let mut airports = vec![self.graph[start].clone()];
        let mut flights = Vec::with_capacity(edges.len());
        for edge in edges {
            if let Some((_, target)) = self.graph.edge_endpoints(*edge) {
                airports.push(self.graph[target].clone());
            }
            flights.push(self.graph[*edge].clone());
        }
        Route { airports, flights }
    }

    /// Graphviz rendering; nodes are airport codes, edges carry carrier, minutes and price.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::GraphContentOnly]))
            .lines()
            .filter(|line| !line.trim().is_empty())
            .fold(String::from("digraph airports {\n"), |mut out, line| {
                out.push_str(line);
                out.push('\n');
                out
            })
            + "}\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn ticket(
        origin: &str,
        destination: &str,
        depart: (u32, u32),
        arrive: (u32, u32),
        price: u32,
    ) -> Ticket {
        let date = NaiveDate::from_ymd_opt(2018, 5, 12).unwrap();
        Ticket {
            origin: origin.to_string(),
            origin_name: String::new(),
            destination: destination.to_string(),
            destination_name: String::new(),
            departure_date: date,
            departure_time: NaiveTime::from_hms_opt(depart.0, depart.1, 0).unwrap(),
            arrival_date: date,
            arrival_time: NaiveTime::from_hms_opt(arrive.0, arrive.1, 0).unwrap(),
            carrier: "SU".to_string(),
            stops: 0,
            price,
        }
    }

    fn sample_graph() -> AirportGraph {
        AirportGraph::from_tickets(&[
            ticket("VVO", "TLV", (6, 0), (16, 0), 12000),
            ticket("VVO", "TLV", (8, 0), (15, 0), 15000),
            ticket("VVO", "UFA", (6, 0), (8, 0), 4000),
            ticket("UFA", "TLV", (9, 0), (13, 0), 5000),
        ])
        .unwrap()
    }

    #[test]
    fn test_parallel_tickets_make_parallel_edges() {
        let graph = sample_graph();
        assert_eq!(graph.airport_count(), 3);
        assert_eq!(graph.flight_count(), 4);
        assert!(graph.contains("UFA"));
        assert!(!graph.contains("LRN"));
    }

    #[test]
    fn test_shortest_path_goes_through_transfer() {
        let graph = sample_graph();
        let route = graph.shortest_path("VVO", "TLV").unwrap().unwrap();

        assert_eq!(route.sequence(), "VVO -> UFA -> TLV");
        assert_eq!(route.total_minutes(), 360);
        assert_eq!(route.total_price(), 9000);
    }

    #[test]
    fn test_shortest_path_picks_fastest_parallel_edge() {
        let graph = AirportGraph::from_tickets(&[
            ticket("VVO", "TLV", (6, 0), (16, 0), 12000),
            ticket("VVO", "TLV", (8, 0), (15, 0), 15000),
        ])
        .unwrap();

        let route = graph.shortest_path("VVO", "TLV").unwrap().unwrap();
        assert_eq!(route.flights.len(), 1);
        assert_eq!(route.total_minutes(), 420);
        assert_eq!(route.total_price(), 15000);
    }

    #[test]
    fn test_unreachable_and_unknown_airports() {
        let graph = sample_graph();
        assert!(graph.shortest_path("TLV", "VVO").unwrap().is_none());
        assert!(matches!(
            graph.shortest_path("VVO", "LRN"),
            Err(RouteError::UnknownAirportError { .. })
        ));
    }

    #[test]
    fn test_all_paths_counts_each_parallel_edge() {
        let graph = sample_graph();
        let routes = graph
            .all_paths("VVO", "TLV", &PathSearch::default())
            .unwrap();

        let mut prices: Vec<u64> = routes.iter().map(Route::total_price).collect();
        prices.sort_unstable();
        assert_eq!(prices, vec![9000, 12000, 15000]);
        assert_eq!(routes[0].sequence(), "VVO -> TLV");
    }

    #[test]
    fn test_all_paths_respects_max_length() {
        let graph = sample_graph();
        let search = PathSearch {
            max_path_length: 1,
            ..PathSearch::default()
        };
        let routes = graph.all_paths("VVO", "TLV", &search).unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.flights.len() == 1));
    }

    #[test]
    fn test_cycle_mode_revisits_airports_within_bound() {
        let graph = AirportGraph::from_tickets(&[
            ticket("VVO", "UFA", (6, 0), (8, 0), 100),
            ticket("UFA", "VVO", (9, 0), (11, 0), 100),
            ticket("UFA", "TLV", (9, 0), (13, 0), 100),
        ])
        .unwrap();

        let simple = graph.all_paths("VVO", "TLV", &PathSearch::default()).unwrap();
        assert_eq!(simple.len(), 1);

        let cyclic = PathSearch {
            simple_only: false,
            max_path_length: 4,
            ..PathSearch::default()
        };
        let routes = graph.all_paths("VVO", "TLV", &cyclic).unwrap();
        let mut sequences: Vec<String> = routes.iter().map(Route::sequence).collect();
        sequences.sort_by_key(|s| s.len());
        assert_eq!(
            sequences,
            vec!["VVO -> UFA -> TLV", "VVO -> UFA -> VVO -> UFA -> TLV"]
        );
    }

    fn parallel_cycle_graph() -> AirportGraph {
        AirportGraph::from_tickets(&[
            ticket("VVO", "UFA", (6, 0), (8, 0), 100),
            ticket("VVO", "UFA", (7, 0), (9, 0), 110),
            ticket("UFA", "VVO", (9, 0), (11, 0), 100),
            ticket("UFA", "VVO", (10, 0), (12, 0), 110),
            ticket("UFA", "TLV", (9, 0), (13, 0), 100),
        ])
        .unwrap()
    }

    #[test]
    fn test_cycle_mode_counts_every_parallel_walk() {
        let graph = parallel_cycle_graph();
        let search = PathSearch {
            simple_only: false,
            max_path_length: 5,
            ..PathSearch::default()
        };

        // 2 direct walks of two flights, 2 * 2 * 2 walks of four flights.
        let routes = graph.all_paths("VVO", "TLV", &search).unwrap();
        assert_eq!(routes.len(), 10);
        assert!(routes.iter().all(|r| r.flights.len() <= 5));
    }

    #[test]
    fn test_cycle_mode_stops_at_max_routes() {
        let graph = parallel_cycle_graph();
        let search = PathSearch {
            simple_only: false,
            max_path_length: 1_000,
            max_routes: 50,
        };

        let routes = graph.all_paths("VVO", "TLV", &search).unwrap();
        assert_eq!(routes.len(), 50);
        assert!(routes
            .iter()
            .all(|r| r.airports.last().map(|a| a.code.as_str()) == Some("TLV")));
    }

    #[test]
    fn test_dead_end_airports_are_skipped() {
        let graph = AirportGraph::from_tickets(&[
            ticket("VVO", "KZN", (6, 0), (8, 0), 100),
            ticket("KZN", "KZN", (9, 0), (10, 0), 100),
            ticket("VVO", "TLV", (6, 0), (16, 0), 100),
        ])
        .unwrap();
        let search = PathSearch {
            simple_only: false,
            max_path_length: 1_000,
            max_routes: 5,
        };

        let routes = graph.all_paths("VVO", "TLV", &search).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].sequence(), "VVO -> TLV");
    }

    #[test]
    fn test_rejects_ticket_arriving_before_departure() {
        let err = AirportGraph::from_tickets(&[ticket("VVO", "TLV", (16, 0), (6, 0), 100)])
            .unwrap_err();
        assert!(matches!(err, RouteError::InvalidTicketError { index: 0, .. }));
    }

    #[test]
    fn test_dot_export_lists_airports() {
        let dot = sample_graph().to_dot();
        assert!(dot.starts_with("digraph airports {"));
        assert!(dot.contains("VVO"));
        assert!(dot.contains("UFA"));
        assert!(dot.contains("->"));
        assert!(dot.trim_end().ends_with('}'));
    }
}
